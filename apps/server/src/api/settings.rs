use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use signal_core::settings::{ApiKeysUpdate, Settings};

use crate::{error::ApiResult, main_lib::AppState};

/// Settings with every key masked.
async fn get_settings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Settings>> {
    let settings = state.settings_store.get_settings()?;
    Ok(Json(settings.masked()))
}

async fn update_api_keys(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ApiKeysUpdate>,
) -> ApiResult<Json<Settings>> {
    let settings = state.settings_store.update_api_keys(&update).await?;
    tracing::info!("API keys updated");
    Ok(Json(settings.masked()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/settings", get(get_settings))
        .route("/settings/api-keys", put(update_api_keys))
}
