use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use spendwise_core::{
    budget::BudgetAlert,
    constants::DEFAULT_PAGE_SIZE,
    ledger::{
        EntryKind, NewTransaction, Transaction, TransactionFilter, TransactionPage,
        TransactionQuery, TransactionSort, TransactionUpdate,
    },
    utils::time_utils::{days_before, local_today},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedTransaction {
    pub transaction: Transaction,
    pub alert: Option<BudgetAlert>,
}

/// Query string of the transaction listing. Values arrive as text and are
/// checked here so a bad value gets the usual error body.
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// `INCOME`, `EXPENSE` or `all`.
    kind: Option<String>,
    /// A category name or `all`.
    category: Option<String>,
    /// Days back from today, or `all`.
    range: Option<String>,
    search: Option<String>,
    /// `date-desc`, `date-asc`, `amount-desc` or `amount-asc`.
    sort: Option<String>,
    page: Option<String>,
    per_page: Option<String>,
}

fn selected(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn parse_number(name: &str, value: Option<String>, default: u32) -> Result<u32, ApiError> {
    match selected(value) {
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| ApiError::BadRequest(format!("{} must be a whole number, got '{}'", name, text))),
        None => Ok(default),
    }
}

impl ListParams {
    fn into_query(self) -> Result<TransactionQuery, ApiError> {
        let kind = match selected(self.kind) {
            Some(kind) => Some(
                EntryKind::from_db_str(&kind.to_ascii_uppercase())
                    .ok_or_else(|| ApiError::BadRequest(format!("unknown kind '{}'", kind)))?,
            ),
            None => None,
        };
        let since = match selected(self.range) {
            Some(days) => {
                let days = days.parse::<u32>().map_err(|_| {
                    ApiError::BadRequest(format!("range must be a number of days, got '{}'", days))
                })?;
                Some(days_before(local_today(), days))
            }
            None => None,
        };
        let sort = match selected(self.sort) {
            Some(sort) => TransactionSort::from_param(&sort)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown sort '{}'", sort)))?,
            None => TransactionSort::default(),
        };

        Ok(TransactionQuery {
            filter: TransactionFilter {
                kind,
                category: selected(self.category),
                since,
                search: self
                    .search
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            },
            sort,
            page: parse_number("page", self.page, 1)?,
            per_page: parse_number("perPage", self.per_page, DEFAULT_PAGE_SIZE)?,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    responses(
        (status = 200, description = "One page of matching transactions with totals"),
        (status = 400, description = "Unknown kind or sort, or a malformed number")
    )
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<TransactionPage>> {
    let query = params.into_query()?;
    let page = state.transaction_service.list_transactions(&query)?;
    Ok(Json(page))
}

/// Records a transaction, then reports the spending alert it triggers.
///
/// Only expenses are checked, and only when budget warnings are enabled in
/// the settings. A failed lookup is logged and reported as no alert, since
/// the transaction itself is already stored.
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    responses(
        (status = 201, description = "Stored transaction and any spending alert"),
        (status = 400, description = "Missing name or category, or an amount out of range")
    )
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ApiJson(new_transaction): ApiJson<NewTransaction>,
) -> ApiResult<(StatusCode, Json<RecordedTransaction>)> {
    let transaction = state
        .transaction_service
        .record_transaction(new_transaction)
        .await?;

    let alert = if transaction.kind == EntryKind::Expense {
        spending_alert(&state)
    } else {
        None
    };

    if let Some(ref alert) = alert {
        tracing::debug!("Spending alert after {}: {}", transaction.id, alert.message);
    }

    Ok((
        StatusCode::CREATED,
        Json(RecordedTransaction { transaction, alert }),
    ))
}

fn spending_alert(state: &AppState) -> Option<BudgetAlert> {
    match state.settings_service.get_settings() {
        Ok(settings) if settings.budget_warnings => state
            .budget_service
            .check_spending_alert()
            .unwrap_or_else(|e| {
                tracing::warn!("Spending alert check failed: {}", e);
                None
            }),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Could not read settings for spending alert: {}", e);
            None
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "The transaction"),
        (status = 404, description = "No transaction with this id")
    )
)]
pub async fn get_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get_transaction(&id)?;
    Ok(Json(transaction))
}

#[utoipa::path(
    put,
    path = "/api/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "The corrected transaction"),
        (status = 400, description = "Missing name or category, or an amount out of range"),
        (status = 404, description = "No transaction with this id")
    )
)]
pub async fn update_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<TransactionUpdate>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .update_transaction(&id, update)
        .await?;
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 204, description = "Transaction removed"),
        (status = 404, description = "No transaction with this id")
    )
)]
pub async fn delete_transaction(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.transaction_service.delete_transaction(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}
