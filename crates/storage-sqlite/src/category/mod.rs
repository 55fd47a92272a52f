//! SQLite storage implementation for categories.

mod model;
mod repository;

pub use model::CategoryDB;
pub use repository::CategoryRepository;

// Re-export trait from core for convenience
pub use spendwise_core::category::CategoryRepositoryTrait;
