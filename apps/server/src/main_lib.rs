use std::sync::Arc;

use crate::config::Config;
use spendwise_core::{
    budget::{BudgetService, BudgetServiceTrait},
    category::{CategoryService, CategoryServiceTrait},
    ledger::{TransactionService, TransactionServiceTrait},
    settings::{SettingsService, SettingsServiceTrait},
};
use spendwise_storage_sqlite::{
    budget::BudgetRepository,
    category::CategoryRepository,
    db::{self, write_actor},
    ledger::TransactionRepository,
    settings::SettingsRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("SPENDWISE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let settings_repo = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));

    let budget_service = Arc::new(BudgetService::new(budget_repo, transaction_repo.clone()));
    let category_service = Arc::new(CategoryService::new(category_repo));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo));
    let settings_service = Arc::new(SettingsService::new(settings_repo));

    Ok(Arc::new(AppState {
        budget_service,
        category_service,
        transaction_service,
        settings_service,
    }))
}
