use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use signal_core::{ResolutionOutcome, TierAttempt};
use signal_market_data::{AssetClass, AssetQuery, AssetQuote};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResolveRequest {
    query: String,
    /// Wire name, case-insensitive. Defaults to stock.
    #[serde(default)]
    asset_class: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
enum ResolveStatus {
    Resolved,
    NotFound,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    status: ResolveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<AssetQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    asset_class_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    attempts: Vec<TierAttempt>,
}

async fn resolve_asset(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ResolveRequest>,
) -> ApiResult<Json<ResolveResponse>> {
    let asset_class = match body.asset_class.as_deref() {
        Some(raw) => raw
            .parse::<AssetClass>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => AssetClass::default(),
    };

    let vendor_api_key = state.settings_store.vendor_api_key()?;
    let query = AssetQuery::new(body.query, asset_class);
    let report = state
        .resolver
        .resolve_detailed(&query, vendor_api_key.as_deref())
        .await;

    let (status, quote) = match report.outcome {
        ResolutionOutcome::Resolved(quote) => (ResolveStatus::Resolved, Some(quote)),
        ResolutionOutcome::VendorUnavailable(_) | ResolutionOutcome::NotFound { .. } => {
            (ResolveStatus::NotFound, None)
        }
    };

    Ok(Json(ResolveResponse {
        status,
        asset_class_label: quote.as_ref().map(|q| q.asset_class().label()),
        quote,
        message: report.notice,
        attempts: report.attempts,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/assets/resolve", post(resolve_asset))
}
