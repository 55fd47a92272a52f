//! SQLite storage implementation for the transaction ledger.

mod model;
mod repository;

pub use model::TransactionDB;
pub use repository::TransactionRepository;

// Re-export traits from core for convenience
pub use spendwise_core::ledger::{TransactionLedgerTrait, TransactionRepositoryTrait};
