use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;

use super::budget_alerts::evaluate_alert;
use super::budget_model::{BudgetAlert, BudgetConfig, BudgetStatus};
use super::budget_status::compute_status;
use super::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::constants::MAX_AMOUNT;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::TransactionLedgerTrait;

/// Normalizes and validates a candidate configuration.
///
/// Checks run in order and the first failure wins: the total must be
/// positive and at most `MAX_AMOUNT`, then non-positive category limits are
/// dropped, then each remaining limit must be at most `MAX_AMOUNT` and
/// together they must not add up to more than the total.
pub fn validate_budget_config(mut candidate: BudgetConfig) -> Result<BudgetConfig> {
    if candidate.total_limit <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount(format!(
            "budget total must be positive, got {}",
            candidate.total_limit
        ))
        .into());
    }
    if candidate.total_limit > MAX_AMOUNT {
        return Err(ValidationError::InvalidAmount(format!(
            "budget total must not exceed {}, got {}",
            MAX_AMOUNT, candidate.total_limit
        ))
        .into());
    }

    candidate.category_limits.retain(|category, limit| {
        let keep = *limit > Decimal::ZERO;
        if !keep {
            debug!("Dropping non-positive limit {} for '{}'", limit, category);
        }
        keep
    });

    if let Some((category, limit)) = candidate
        .category_limits
        .iter()
        .find(|(_, limit)| **limit > MAX_AMOUNT)
    {
        return Err(ValidationError::InvalidAmount(format!(
            "limit for '{}' must not exceed {}, got {}",
            category, MAX_AMOUNT, limit
        ))
        .into());
    }

    let total_category_limits = candidate.total_category_limits();
    if total_category_limits > candidate.total_limit {
        return Err(ValidationError::LimitsExceedTotal {
            total_category_limits,
            total_budget: candidate.total_limit,
        }
        .into());
    }

    Ok(candidate)
}

pub struct BudgetService {
    repository: Arc<dyn BudgetRepositoryTrait>,
    ledger: Arc<dyn TransactionLedgerTrait>,
}

impl BudgetService {
    pub fn new(
        repository: Arc<dyn BudgetRepositoryTrait>,
        ledger: Arc<dyn TransactionLedgerTrait>,
    ) -> Self {
        BudgetService { repository, ledger }
    }

    fn status_for(&self, config: Option<&BudgetConfig>) -> Result<BudgetStatus> {
        match config {
            Some(config) => {
                let entries = self.ledger.entries_for_current_period(config.period)?;
                Ok(compute_status(Some(config), &entries))
            }
            None => Ok(BudgetStatus::unconfigured()),
        }
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budget_config(&self) -> Result<Option<BudgetConfig>> {
        self.repository.get_budget_config()
    }

    async fn save_budget_config(&self, candidate: BudgetConfig) -> Result<BudgetConfig> {
        let config = validate_budget_config(candidate)?;
        let saved = self.repository.replace_budget_config(config).await?;
        info!(
            "Saved {} budget of {} with {} category limit(s)",
            saved.period.label(),
            saved.total_limit,
            saved.category_limits.len()
        );
        Ok(saved)
    }

    async fn delete_budget_config(&self) -> Result<()> {
        let removed = self.repository.clear_budget_config().await?;
        if removed == 0 {
            return Err(Error::NotFound("No budget is configured".to_string()));
        }
        info!("Budget removed");
        Ok(())
    }

    fn get_budget_status(&self) -> Result<BudgetStatus> {
        let config = self.repository.get_budget_config()?;
        self.status_for(config.as_ref())
    }

    fn check_spending_alert(&self) -> Result<Option<BudgetAlert>> {
        let Some(config) = self.repository.get_budget_config()? else {
            return Ok(None);
        };
        if !config.alerts_enabled {
            return Ok(None);
        }
        let status = self.status_for(Some(&config))?;
        Ok(evaluate_alert(&config, &status))
    }
}
