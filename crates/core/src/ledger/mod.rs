//! Transaction ledger module - entries fed to the budget, plus transaction history.

mod ledger_model;
mod ledger_service;
mod ledger_traits;

pub use ledger_model::{
    EntryKind, LedgerEntry, NewTransaction, Transaction, TransactionFilter, TransactionPage,
    TransactionQuery, TransactionSort, TransactionSummary, TransactionUpdate,
};
pub use ledger_service::TransactionService;
pub use ledger_traits::{
    TransactionLedgerTrait, TransactionRepositoryTrait, TransactionServiceTrait,
};
