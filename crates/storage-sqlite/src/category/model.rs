//! Database model for categories.

use diesel::prelude::*;
use spendwise_core::category::{Category, NewCategory};
use spendwise_core::ledger::EntryKind;

use crate::errors::StorageError;

/// Database model for categories
#[derive(Queryable, Insertable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub color: Option<String>,
}

impl CategoryDB {
    pub fn from_new(id: String, new_category: NewCategory) -> Self {
        Self {
            id,
            name: new_category.name,
            kind: new_category.kind.as_db_str().to_string(),
            color: new_category.color,
        }
    }
}

impl TryFrom<CategoryDB> for Category {
    type Error = StorageError;

    fn try_from(db: CategoryDB) -> Result<Self, Self::Error> {
        let kind = EntryKind::from_db_str(&db.kind).ok_or_else(|| {
            StorageError::CorruptValue(format!("kind '{}' on category {}", db.kind, db.id))
        })?;
        Ok(Self {
            id: db.id,
            name: db.name,
            kind,
            color: db.color,
        })
    }
}
