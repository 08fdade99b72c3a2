use std::sync::Arc;

use axum::{routing::post, Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_core::portfolio::{
    build_position, total_market_value, EntryKind, NewPosition, PositionEntry,
};
use signal_market_data::{AssetClass, AssetQuote, QuoteSource};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

/// A previously resolved quote echoed back by the client.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteInput {
    symbol: String,
    #[serde(default)]
    display_name: String,
    price: Decimal,
    asset_class: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreviewPositionRequest {
    quote: QuoteInput,
    #[serde(default)]
    kind: EntryKind,
    #[serde(default)]
    shares: Option<Decimal>,
    #[serde(default)]
    avg_cost: Option<Decimal>,
    /// Entries already tracked; used for the new portfolio total.
    #[serde(default)]
    holdings: Vec<PositionEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewPositionResponse {
    entry: PositionEntry,
    quantity_label: &'static str,
    portfolio_total: Decimal,
}

async fn preview_position(
    Json(body): Json<PreviewPositionRequest>,
) -> ApiResult<Json<PreviewPositionResponse>> {
    let asset_class = body
        .quote
        .asset_class
        .parse::<AssetClass>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let quote = AssetQuote::new(
        &body.quote.symbol,
        &body.quote.display_name,
        body.quote.price,
        asset_class,
        QuoteSource::Lookup,
    )?;

    let entry = build_position(
        &quote,
        &NewPosition {
            kind: body.kind,
            shares: body.shares,
            avg_cost: body.avg_cost,
        },
    )?;

    let mut holdings = body.holdings;
    holdings.push(entry.clone());
    let portfolio_total = total_market_value(&holdings)?;

    Ok(Json(PreviewPositionResponse {
        quantity_label: asset_class.quantity_label(),
        portfolio_total,
        entry,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/portfolio/positions/preview", post(preview_position))
}
