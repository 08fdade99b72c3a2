use rust_decimal::Decimal;
use serde::Serialize;

use super::asset_class::AssetClass;
use crate::errors::MarketDataError;
use crate::validation::{normalize_symbol, price_from_f64, validate_price};

/// Which tier produced a quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", rename_all = "camelCase")]
pub enum QuoteSource {
    /// Deterministic vendor API (e.g. "ALPHA_VANTAGE")
    Vendor { provider: String },
    /// Natural-language lookup service
    Lookup,
}

impl QuoteSource {
    pub fn vendor(provider: impl Into<String>) -> Self {
        Self::Vendor {
            provider: provider.into(),
        }
    }

    pub fn is_vendor(&self) -> bool {
        matches!(self, Self::Vendor { .. })
    }
}

/// A normalized, validated asset quote.
///
/// Can only be built through [`AssetQuote::new`] or [`AssetQuote::from_f64`],
/// so every instance has an uppercase canonical symbol and a strictly
/// positive price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    symbol: String,
    display_name: String,
    price: Decimal,
    asset_class: AssetClass,
    source: QuoteSource,
}

impl AssetQuote {
    /// Validate and normalize a candidate quote.
    ///
    /// An empty display name falls back to the symbol.
    pub fn new(
        symbol: &str,
        display_name: &str,
        price: Decimal,
        asset_class: AssetClass,
        source: QuoteSource,
    ) -> Result<Self, MarketDataError> {
        let price = validate_price(price)?;
        let symbol = normalize_symbol(symbol, asset_class)?;
        let display_name = match display_name.trim() {
            "" => symbol.clone(),
            name => name.to_string(),
        };

        Ok(Self {
            symbol,
            display_name,
            price,
            asset_class,
            source,
        })
    }

    /// Same as [`AssetQuote::new`] for a floating point price (rejects NaN and infinities).
    pub fn from_f64(
        symbol: &str,
        display_name: &str,
        price: f64,
        asset_class: AssetClass,
        source: QuoteSource,
    ) -> Result<Self, MarketDataError> {
        Self::new(
            symbol,
            display_name,
            price_from_f64(price)?,
            asset_class,
            source,
        )
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    pub fn source(&self) -> &QuoteSource {
        &self.source
    }
}
