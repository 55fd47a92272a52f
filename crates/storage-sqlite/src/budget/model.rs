//! Database models for budgets and their category limits.

use std::collections::BTreeMap;

use diesel::prelude::*;
use spendwise_core::budget::{BudgetConfig, BudgetPeriod};

use crate::errors::StorageError;
use crate::utils::text_to_decimal;

/// Database model for a budget row. Only one row is active at a time;
/// replaced budgets keep their row with `is_active = false` and an `end_date`.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub amount: String,
    pub period: String,
    pub alerts_enabled: bool,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// Database model for inserting a budget row
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
pub struct NewBudgetDB {
    pub id: String,
    pub amount: String,
    pub period: String,
    pub alerts_enabled: bool,
    pub start_date: String,
    pub is_active: bool,
}

/// Database model for a per-category limit attached to a budget row
#[derive(
    Queryable, Insertable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(BudgetDB, foreign_key = budget_id))]
#[diesel(table_name = crate::schema::category_budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryBudgetDB {
    pub id: String,
    pub budget_id: String,
    pub category: String,
    pub limit_amount: String,
    pub is_active: bool,
}

impl BudgetDB {
    /// Rebuilds the domain config from an active budget row and its limits.
    pub fn into_config(self, limits: Vec<CategoryBudgetDB>) -> Result<BudgetConfig, StorageError> {
        let period = BudgetPeriod::from_db_str(&self.period).ok_or_else(|| {
            StorageError::CorruptValue(format!("period '{}' on budget {}", self.period, self.id))
        })?;

        let mut category_limits = BTreeMap::new();
        for limit in limits {
            let amount = text_to_decimal("limit_amount", &limit.limit_amount)?;
            category_limits.insert(limit.category, amount);
        }

        Ok(BudgetConfig {
            total_limit: text_to_decimal("amount", &self.amount)?,
            category_limits,
            alerts_enabled: self.alerts_enabled,
            period,
        })
    }
}
