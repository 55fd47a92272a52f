use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::ledger_model::{
    NewTransaction, Transaction, TransactionPage, TransactionQuery, TransactionUpdate,
};
use super::ledger_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::errors::Result;

pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        self.repository.get_transaction(transaction_id)
    }

    fn list_transactions(&self, query: &TransactionQuery) -> Result<TransactionPage> {
        let matched = self.repository.search_transactions(&query.filter)?;
        Ok(TransactionPage::paginate(
            matched,
            query.sort,
            query.page,
            query.per_page,
        ))
    }

    async fn record_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let validated = new_transaction.validate()?;
        debug!(
            "Recording {} of {} in '{}'",
            validated.kind.as_db_str(),
            validated.amount,
            validated.category
        );
        self.repository.create_transaction(validated).await
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let validated = update.validate()?;
        debug!("Updating transaction {}", transaction_id);
        self.repository
            .update_transaction(transaction_id, validated)
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let deleted = self.repository.delete_transaction(transaction_id).await?;
        info!(
            "Deleted {} '{}' of {}",
            deleted.kind.as_db_str(),
            deleted.name,
            deleted.amount
        );
        Ok(deleted)
    }
}
