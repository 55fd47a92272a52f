//! Budget module - configuration, status computation, services, and traits.

mod budget_alerts;
mod budget_model;
mod budget_service;
mod budget_status;
mod budget_traits;

pub use budget_alerts::evaluate_alert;
pub use budget_model::{
    AlertLevel, BudgetAlert, BudgetConfig, BudgetPeriod, BudgetStatus, CategorySpend, StatusBand,
};
pub use budget_service::{validate_budget_config, BudgetService};
pub use budget_status::compute_status;
pub use budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
