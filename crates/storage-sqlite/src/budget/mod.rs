//! SQLite storage implementation for the budget configuration.

mod model;
mod repository;

pub use model::{BudgetDB, CategoryBudgetDB, NewBudgetDB};
pub use repository::BudgetRepository;

// Re-export trait from core for convenience
pub use spendwise_core::budget::BudgetRepositoryTrait;
