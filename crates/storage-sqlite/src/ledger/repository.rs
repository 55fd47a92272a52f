use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use spendwise_core::budget::BudgetPeriod;
use spendwise_core::ledger::{
    LedgerEntry, NewTransaction, Transaction, TransactionFilter, TransactionLedgerTrait,
    TransactionRepositoryTrait, TransactionUpdate,
};
use spendwise_core::utils::time_utils::local_today;
use spendwise_core::{Error, Result};
use uuid::Uuid;

use super::model::{LedgerRowDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::utils::{date_to_text, decimal_to_text};

fn not_found(transaction_id: &str) -> Error {
    Error::NotFound(format!("Transaction {} not found", transaction_id))
}

pub struct TransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TransactionRepository { pool, writer }
    }

    /// Entries dated within `[start, end]`, both inclusive.
    pub fn entries_between(&self, start: &str, end: &str) -> Result<Vec<LedgerEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::transaction_date.ge(start))
            .filter(transactions::transaction_date.le(end))
            .select((
                transactions::category,
                transactions::amount,
                transactions::kind,
            ))
            .load::<LedgerRowDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter()
            .map(|row| LedgerEntry::try_from(row).map_err(Error::from))
            .collect()
    }

    fn load(conn: &mut SqliteConnection, transaction_id: &str) -> Result<Option<TransactionDB>> {
        Ok(transactions::table
            .find(transaction_id)
            .select(TransactionDB::as_select())
            .first::<TransactionDB>(conn)
            .optional()
            .map_err(StorageError::from)?)
    }
}

impl TransactionLedgerTrait for TransactionRepository {
    fn entries_for_current_period(&self, period: BudgetPeriod) -> Result<Vec<LedgerEntry>> {
        let (start, end) = period.bounds(local_today());
        self.entries_between(&date_to_text(start), &date_to_text(end))
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn get_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        let row = Self::load(&mut conn, transaction_id)?.ok_or_else(|| not_found(transaction_id))?;
        Ok(Transaction::try_from(row)?)
    }

    fn search_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = transactions::table
            .select(TransactionDB::as_select())
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .into_boxed();

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::kind.eq(kind.as_db_str()));
        }
        if let Some(category) = filter.category.clone() {
            query = query.filter(transactions::category.eq(category));
        }
        if let Some(since) = filter.since {
            query = query.filter(transactions::transaction_date.ge(date_to_text(since)));
        }
        if let Some(search) = filter.search.as_deref() {
            // SQLite's LIKE already ignores ASCII case. A NULL note never matches.
            let pattern = format!("%{}%", search);
            query = query.filter(
                transactions::name
                    .like(pattern.clone())
                    .or(transactions::notes.assume_not_null().like(pattern)),
            );
        }

        let rows = query
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Transaction::try_from(row).map_err(Error::from))
            .collect()
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let row = TransactionDB::from_new(Uuid::new_v4().to_string(), new_transaction);
                let inserted = diesel::insert_into(transactions::table)
                    .values(&row)
                    .returning(TransactionDB::as_returning())
                    .get_result::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(inserted)?)
            })
            .await
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let updated = diesel::update(transactions::table.find(&transaction_id))
                    .set((
                        transactions::name.eq(update.name),
                        transactions::amount.eq(decimal_to_text(update.amount)),
                        transactions::category.eq(update.category),
                        transactions::notes.eq(update.notes),
                    ))
                    .returning(TransactionDB::as_returning())
                    .get_result::<TransactionDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| not_found(&transaction_id))?;
                Ok(Transaction::try_from(updated)?)
            })
            .await
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<Transaction> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let existing =
                    Self::load(conn, &transaction_id)?.ok_or_else(|| not_found(&transaction_id))?;
                diesel::delete(transactions::table.find(&transaction_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(Transaction::try_from(existing)?)
            })
            .await
    }
}
