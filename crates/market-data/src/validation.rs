//! Candidate validation and symbol normalization.
//!
//! Every quote surfaced by either tier passes through these checks:
//! - Price must be finite and strictly positive
//! - Symbol must be non-empty and is uppercased
//! - Forex symbols are always `BASE/QUOTE`

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{AssetClass, DEFAULT_QUOTE_CURRENCY};

/// Reject zero and negative prices.
pub fn validate_price(price: Decimal) -> Result<Decimal, MarketDataError> {
    if price <= Decimal::ZERO {
        return Err(MarketDataError::validation(format!(
            "price must be positive, got {}",
            price
        )));
    }
    Ok(price)
}

/// Convert a floating point price, rejecting NaN, infinities and non-positive values.
pub fn price_from_f64(price: f64) -> Result<Decimal, MarketDataError> {
    if !price.is_finite() {
        return Err(MarketDataError::validation(format!(
            "price must be finite, got {}",
            price
        )));
    }
    let decimal = Decimal::from_f64(price).ok_or_else(|| {
        MarketDataError::validation(format!("price out of range: {}", price))
    })?;
    validate_price(decimal)
}

/// Parse a price string as returned by the vendor ("189.4000").
pub fn parse_price(raw: &str) -> Result<Decimal, MarketDataError> {
    let trimmed = raw.trim();
    let price = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| MarketDataError::validation(format!("unparseable price: {:?}", raw)))?;
    validate_price(price)
}

/// Canonical uppercase symbol for an asset class.
///
/// Forex symbols are forced into `BASE/QUOTE`: a bare six-letter pair
/// ("EURUSD") is split in half, a single code gets a USD quote.
pub fn normalize_symbol(raw: &str, asset_class: AssetClass) -> Result<String, MarketDataError> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(MarketDataError::validation("symbol is empty"));
    }

    if asset_class != AssetClass::Forex {
        return Ok(symbol);
    }

    if let Some((base, quote)) = symbol.split_once('/') {
        let base = base.trim();
        let quote = match quote.trim() {
            "" => DEFAULT_QUOTE_CURRENCY,
            quote => quote,
        };
        if base.is_empty() {
            return Err(MarketDataError::validation(format!(
                "forex symbol has no base currency: {}",
                raw
            )));
        }
        return Ok(format!("{}/{}", base, quote));
    }

    if symbol.len() == 6 && symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Ok(format!("{}/{}", &symbol[..3], &symbol[3..]));
    }

    Ok(format!("{}/{}", symbol, DEFAULT_QUOTE_CURRENCY))
}
