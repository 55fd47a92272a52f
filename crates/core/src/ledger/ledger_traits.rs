use async_trait::async_trait;

use super::ledger_model::{
    LedgerEntry, NewTransaction, Transaction, TransactionFilter, TransactionPage,
    TransactionQuery, TransactionUpdate,
};
use crate::budget::BudgetPeriod;
use crate::errors::Result;

/// Source of the entries a budget is measured against.
pub trait TransactionLedgerTrait: Send + Sync {
    /// Entries dated within the period that contains today.
    fn entries_for_current_period(&self, period: BudgetPeriod) -> Result<Vec<LedgerEntry>>;
}

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    /// Every transaction `filter` matches, newest first.
    fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    /// Removes the transaction and returns it as it was.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction>;

    fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage>;

    async fn record_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction>;
}
