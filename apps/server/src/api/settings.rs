use std::sync::Arc;

use crate::{error::ApiResult, extract::ApiJson, main_lib::AppState};
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use spendwise_core::settings::{Settings, SettingsUpdate};

#[utoipa::path(get, path = "/api/v1/settings", responses((status = 200, description = "Settings")))]
pub async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Settings>> {
    let s = state.settings_service.get_settings()?;
    Ok(Json(s))
}

#[utoipa::path(
    put,
    path = "/api/v1/settings",
    responses(
        (status = 200, description = "Settings after the update"),
        (status = 400, description = "Unknown theme")
    )
)]
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    ApiJson(update): ApiJson<SettingsUpdate>,
) -> ApiResult<Json<Settings>> {
    let s = state.settings_service.update_settings(&update).await?;
    Ok(Json(s))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
