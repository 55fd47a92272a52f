use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use spendwise_core::budget::{BudgetConfig, BudgetRepositoryTrait};
use spendwise_core::utils::time_utils::local_today;
use spendwise_core::Result;
use uuid::Uuid;

use super::model::{BudgetDB, CategoryBudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{budgets, category_budgets};
use crate::utils::{date_to_text, decimal_to_text};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }

    fn load_active_config(conn: &mut SqliteConnection) -> Result<Option<BudgetConfig>> {
        let budget = budgets::table
            .filter(budgets::is_active.eq(true))
            .order((budgets::created_at.desc(), budgets::id.desc()))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let Some(budget) = budget else {
            return Ok(None);
        };

        let limits = category_budgets::table
            .filter(category_budgets::budget_id.eq(&budget.id))
            .filter(category_budgets::is_active.eq(true))
            .select(CategoryBudgetDB::as_select())
            .load::<CategoryBudgetDB>(conn)
            .map_err(StorageError::from)?;

        Ok(Some(budget.into_config(limits)?))
    }

    /// Marks every active budget row and category limit inactive.
    /// Returns the number of budget rows that were active.
    fn deactivate_all(conn: &mut SqliteConnection, end: &str) -> Result<usize> {
        let budgets_closed = diesel::update(budgets::table.filter(budgets::is_active.eq(true)))
            .set((
                budgets::is_active.eq(false),
                budgets::end_date.eq(Some(end.to_string())),
            ))
            .execute(conn)
            .map_err(StorageError::from)?;

        diesel::update(category_budgets::table.filter(category_budgets::is_active.eq(true)))
            .set(category_budgets::is_active.eq(false))
            .execute(conn)
            .map_err(StorageError::from)?;

        Ok(budgets_closed)
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budget_config(&self) -> Result<Option<BudgetConfig>> {
        let mut conn = get_connection(&self.pool)?;
        Self::load_active_config(&mut conn)
    }

    async fn replace_budget_config(&self, config: BudgetConfig) -> Result<BudgetConfig> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetConfig> {
                let today = date_to_text(local_today());
                let replaced = Self::deactivate_all(conn, &today)?;
                debug!("Deactivated {} previous budget row(s)", replaced);

                let budget_id = Uuid::new_v4().to_string();
                diesel::insert_into(budgets::table)
                    .values(&NewBudgetDB {
                        id: budget_id.clone(),
                        amount: decimal_to_text(config.total_limit),
                        period: config.period.as_db_str().to_string(),
                        alerts_enabled: config.alerts_enabled,
                        start_date: today,
                        is_active: true,
                    })
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let limits: Vec<CategoryBudgetDB> = config
                    .category_limits
                    .iter()
                    .map(|(category, limit)| CategoryBudgetDB {
                        id: Uuid::new_v4().to_string(),
                        budget_id: budget_id.clone(),
                        category: category.clone(),
                        limit_amount: decimal_to_text(*limit),
                        is_active: true,
                    })
                    .collect();

                if !limits.is_empty() {
                    diesel::insert_into(category_budgets::table)
                        .values(&limits)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Ok(config)
            })
            .await
    }

    async fn clear_budget_config(&self) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Self::deactivate_all(conn, &date_to_text(local_today()))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use rust_decimal_macros::dec;
    use spendwise_core::budget::BudgetPeriod;
    use tempfile::tempdir;

    async fn create_test_repository() -> (BudgetRepository, Arc<DbPool>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (BudgetRepository::new(Arc::clone(&pool), writer), pool, temp_dir)
    }

    fn count_rows(pool: &DbPool, active: bool) -> i64 {
        let mut conn = get_connection(pool).unwrap();
        budgets::table
            .filter(budgets::is_active.eq(active))
            .count()
            .get_result(&mut conn)
            .unwrap()
    }

    #[tokio::test]
    async fn empty_database_has_no_config() {
        let (repo, _pool, _dir) = create_test_repository().await;
        assert_eq!(repo.get_budget_config().unwrap(), None);
    }

    #[tokio::test]
    async fn replace_then_read_round_trips() {
        let (repo, _pool, _dir) = create_test_repository().await;
        let config = BudgetConfig::new(dec!(1000))
            .with_category_limit("Food", dec!(300))
            .with_category_limit("Bills", dec!(200.25))
            .with_period(BudgetPeriod::Yearly)
            .with_alerts(false);

        let stored = repo.replace_budget_config(config.clone()).await.unwrap();

        assert_eq!(stored, config);
        assert_eq!(repo.get_budget_config().unwrap(), Some(config));
    }

    #[tokio::test]
    async fn replacing_keeps_history_and_drops_missing_limits() {
        let (repo, pool, _dir) = create_test_repository().await;
        repo.replace_budget_config(
            BudgetConfig::new(dec!(1000)).with_category_limit("Food", dec!(300)),
        )
        .await
        .unwrap();

        let second = BudgetConfig::new(dec!(500)).with_category_limit("Fun", dec!(50));
        repo.replace_budget_config(second.clone()).await.unwrap();

        let current = repo.get_budget_config().unwrap().unwrap();
        assert_eq!(current, second);
        assert_eq!(current.limit_for("Food"), dec!(0));
        assert_eq!(count_rows(&pool, true), 1);
        assert_eq!(count_rows(&pool, false), 1);
    }

    #[tokio::test]
    async fn clear_reports_how_many_budgets_were_active() {
        let (repo, pool, _dir) = create_test_repository().await;
        repo.replace_budget_config(BudgetConfig::new(dec!(100)))
            .await
            .unwrap();

        assert_eq!(repo.clear_budget_config().await.unwrap(), 1);
        assert_eq!(repo.get_budget_config().unwrap(), None);
        assert_eq!(repo.clear_budget_config().await.unwrap(), 0);
        assert_eq!(count_rows(&pool, false), 1);

        let mut conn = get_connection(&pool).unwrap();
        let end_date: Option<String> = budgets::table
            .select(budgets::end_date)
            .first(&mut conn)
            .unwrap();
        assert_eq!(end_date, Some(date_to_text(local_today())));
    }
}
