use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::app_settings::dsl::*;
use spendwise_core::errors::Result;
use spendwise_core::settings::{Settings, SettingsRepositoryTrait, SettingsUpdate};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<Settings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut settings = Settings::default();
        for (key, value) in all_settings {
            settings.apply_pair(&key, &value);
        }

        Ok(settings)
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let rows: Vec<AppSettingDB> = new_settings
            .to_pairs()
            .into_iter()
            .map(|(key, value)| AppSettingDB {
                setting_key: key.to_string(),
                setting_value: value,
            })
            .collect();

        if rows.is_empty() {
            return Ok(());
        }

        self.writer
            .exec(move |conn| {
                for row in &rows {
                    diesel::replace_into(app_settings)
                        .values(row)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use tempfile::tempdir;

    async fn create_test_repository() -> (SettingsRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();

        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (SettingsRepository::new(pool, writer), temp_dir)
    }

    #[tokio::test]
    async fn fresh_database_returns_defaults() {
        let (repo, _dir) = create_test_repository().await;
        assert_eq!(repo.get_settings().unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn partial_updates_leave_other_keys_alone() {
        let (repo, _dir) = create_test_repository().await;

        repo.update_settings(&SettingsUpdate {
            theme: Some("dark".to_string()),
            budget_warnings: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();
        repo.update_settings(&SettingsUpdate {
            weekly_reports: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

        let settings = repo.get_settings().unwrap();
        assert_eq!(settings.theme, "dark");
        assert!(!settings.budget_warnings);
        assert!(settings.weekly_reports);
        assert!(settings.monthly_reports);
    }
}
