use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use spendwise_core::category::{Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory};
use spendwise_core::ledger::EntryKind;
use spendwise_core::{Error, Result};
use uuid::Uuid;

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{categories, transactions};

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn not_found(category_id: &str) -> Error {
    Error::NotFound(format!("Category {} not found", category_id))
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }

    fn load(conn: &mut SqliteConnection, category_id: &str) -> Result<Option<CategoryDB>> {
        Ok(categories::table
            .find(category_id)
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(conn)
            .optional()
            .map_err(StorageError::from)?)
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_categories(&self, kind: Option<EntryKind>) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = categories::table
            .select(CategoryDB::as_select())
            .order((categories::kind.asc(), categories::name.asc()))
            .into_boxed();
        if let Some(kind) = kind {
            query = query.filter(categories::kind.eq(kind.as_db_str()));
        }

        let rows = query
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Category::try_from(row).map_err(Error::from))
            .collect()
    }

    fn get_category(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        let row = Self::load(&mut conn, category_id)?.ok_or_else(|| not_found(category_id))?;
        Ok(Category::try_from(row)?)
    }

    fn find_category(&self, name: &str, kind: EntryKind) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        // `name` is COLLATE NOCASE, so this comparison ignores ASCII case.
        let row = categories::table
            .filter(categories::kind.eq(kind.as_db_str()))
            .filter(categories::name.eq(name))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Category::try_from).transpose()?)
    }

    fn count_transactions(&self, category: &Category) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transactions::table
            .filter(transactions::kind.eq(category.kind.as_db_str()))
            .filter(transactions::category.eq(&category.name))
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let row = CategoryDB::from_new(Uuid::new_v4().to_string(), new_category);
                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::try_from(inserted)?)
            })
            .await
    }

    async fn update_category(&self, category_id: &str, update: CategoryUpdate) -> Result<Category> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let existing =
                    Self::load(conn, &category_id)?.ok_or_else(|| not_found(&category_id))?;

                let updated = diesel::update(categories::table.find(&category_id))
                    .set((
                        categories::name.eq(&update.name),
                        categories::color.eq(&update.color),
                    ))
                    .returning(CategoryDB::as_returning())
                    .get_result::<CategoryDB>(conn)
                    .map_err(StorageError::from)?;

                if existing.name != update.name {
                    let moved = diesel::update(
                        transactions::table
                            .filter(transactions::kind.eq(&existing.kind))
                            .filter(transactions::category.eq(&existing.name)),
                    )
                    .set(transactions::category.eq(&update.name))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    debug!(
                        "Moved {} transactions from '{}' to '{}'",
                        moved, existing.name, update.name
                    );
                }

                Ok(Category::try_from(updated)?)
            })
            .await
    }

    async fn delete_category(&self, category_id: &str) -> Result<usize> {
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(categories::table.find(&category_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
