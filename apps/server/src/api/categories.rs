use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    main_lib::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use spendwise_core::{
    category::{Category, CategoryUpdate, NewCategory},
    ledger::EntryKind,
};
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryParams {
    /// `INCOME` or `EXPENSE`; both when absent.
    kind: Option<String>,
}

#[derive(Serialize)]
pub struct CategoryUsage {
    pub count: i64,
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories, expenses first, each kind sorted by name"),
        (status = 400, description = "Unknown kind")
    )
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryParams>,
) -> ApiResult<Json<Vec<Category>>> {
    let kind = match params.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(kind) => Some(
            EntryKind::from_db_str(&kind.to_ascii_uppercase())
                .ok_or_else(|| ApiError::BadRequest(format!("unknown kind '{}'", kind)))?,
        ),
        None => None,
    };
    let categories = state.category_service.get_categories(kind)?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    responses(
        (status = 201, description = "The new category"),
        (status = 400, description = "Blank name, malformed color or a duplicate name")
    )
)]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.category_service.create_category(new_category).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "The renamed or recolored category"),
        (status = 400, description = "Blank name, malformed color or a duplicate name"),
        (status = 404, description = "No category with this id")
    )
)]
pub async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<CategoryUpdate>,
) -> ApiResult<Json<Category>> {
    let category = state.category_service.update_category(&id, update).await?;
    Ok(Json(category))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category removed; its transactions keep the name"),
        (status = 404, description = "No category with this id")
    )
)]
pub async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.category_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/count",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Number of transactions filed under the category"),
        (status = 404, description = "No category with this id")
    )
)]
pub async fn get_category_usage(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CategoryUsage>> {
    let count = state.category_service.get_category_usage(&id)?;
    Ok(Json(CategoryUsage { count }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/categories/{id}/count", get(get_category_usage))
}
