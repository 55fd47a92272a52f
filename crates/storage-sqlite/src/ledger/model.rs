//! Database model for transactions.

use diesel::prelude::*;
use spendwise_core::ledger::{EntryKind, LedgerEntry, NewTransaction, Transaction};

use crate::errors::StorageError;
use crate::utils::{date_to_text, decimal_to_text, text_to_date, text_to_decimal};

/// Database model for transactions
#[derive(Queryable, Insertable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub transaction_date: String,
    pub notes: Option<String>,
}

impl TransactionDB {
    pub fn from_new(id: String, new_transaction: NewTransaction) -> Self {
        Self {
            id,
            name: new_transaction.name,
            amount: decimal_to_text(new_transaction.amount),
            kind: new_transaction.kind.as_db_str().to_string(),
            category: new_transaction.category,
            transaction_date: date_to_text(new_transaction.date),
            notes: new_transaction.notes,
        }
    }

    fn parse_kind(&self) -> Result<EntryKind, StorageError> {
        EntryKind::from_db_str(&self.kind).ok_or_else(|| {
            StorageError::CorruptValue(format!("kind '{}' on transaction {}", self.kind, self.id))
        })
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = StorageError;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: db.parse_kind()?,
            amount: text_to_decimal("amount", &db.amount)?,
            date: text_to_date("transaction_date", &db.transaction_date)?,
            id: db.id,
            name: db.name,
            category: db.category,
            notes: db.notes,
        })
    }
}

/// Projection used for period aggregation; only the columns status needs.
#[derive(Queryable, Debug)]
pub struct LedgerRowDB {
    pub category: String,
    pub amount: String,
    pub kind: String,
}

impl TryFrom<LedgerRowDB> for LedgerEntry {
    type Error = StorageError;

    fn try_from(row: LedgerRowDB) -> Result<Self, Self::Error> {
        let kind = EntryKind::from_db_str(&row.kind)
            .ok_or_else(|| StorageError::CorruptValue(format!("kind '{}'", row.kind)))?;
        Ok(Self {
            category: row.category,
            amount: text_to_decimal("amount", &row.amount)?,
            kind,
        })
    }
}
