use crate::budget::budget_model::{BudgetAlert, BudgetConfig, BudgetStatus};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for budget repository operations
///
/// Implementations store exactly one active configuration. `replace` and
/// `clear` must be atomic: readers never observe a total without its
/// category limits or the other way around.
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budget_config(&self) -> Result<Option<BudgetConfig>>;

    /// Replaces the active configuration, category limits included.
    async fn replace_budget_config(&self, config: BudgetConfig) -> Result<BudgetConfig>;

    /// Removes the active configuration. Returns how many budgets were removed.
    async fn clear_budget_config(&self) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// The active configuration, or `None` when no budget is set.
    fn get_budget_config(&self) -> Result<Option<BudgetConfig>>;

    /// Validates and stores `candidate`, replacing any existing configuration.
    async fn save_budget_config(&self, candidate: BudgetConfig) -> Result<BudgetConfig>;

    /// Removes the configuration. Fails with `Error::NotFound` when none exists.
    async fn delete_budget_config(&self) -> Result<()>;

    /// Status of the active configuration against the current period's ledger.
    fn get_budget_status(&self) -> Result<BudgetStatus>;

    /// Alert for the current period's spending, if alerts are enabled and a
    /// threshold has been crossed.
    fn check_spending_alert(&self) -> Result<Option<BudgetAlert>>;
}
