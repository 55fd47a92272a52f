use std::sync::Arc;

use crate::{error::ApiResult, extract::ApiJson, main_lib::AppState};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use spendwise_core::budget::{BudgetConfig, BudgetStatus};

#[utoipa::path(
    get,
    path = "/api/v1/budget",
    responses((status = 200, description = "Current budget configuration, or null"))
)]
pub async fn get_budget_config(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<BudgetConfig>>> {
    let config = state.budget_service.get_budget_config()?;
    Ok(Json(config))
}

#[utoipa::path(
    put,
    path = "/api/v1/budget",
    responses(
        (status = 200, description = "Normalized configuration that was stored"),
        (status = 400, description = "Invalid total or category limits exceed the total")
    )
)]
pub async fn save_budget_config(
    State(state): State<Arc<AppState>>,
    ApiJson(candidate): ApiJson<BudgetConfig>,
) -> ApiResult<Json<BudgetConfig>> {
    let saved = state.budget_service.save_budget_config(candidate).await?;
    Ok(Json(saved))
}

#[utoipa::path(
    delete,
    path = "/api/v1/budget",
    responses(
        (status = 204, description = "Budget removed"),
        (status = 404, description = "No budget is configured")
    )
)]
pub async fn delete_budget_config(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.budget_service.delete_budget_config().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/budget/status",
    responses((status = 200, description = "Spending against the budget for the current period"))
)]
pub async fn get_budget_status(State(state): State<Arc<AppState>>) -> ApiResult<Json<BudgetStatus>> {
    let status = state.budget_service.get_budget_status()?;
    Ok(Json(status))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/budget",
            get(get_budget_config)
                .put(save_budget_config)
                .delete(delete_budget_config),
        )
        .route("/budget/status", get(get_budget_status))
}
