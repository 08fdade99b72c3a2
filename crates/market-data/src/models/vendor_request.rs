use std::borrow::Cow;

use super::asset_class::AssetClass;
use super::query::AssetQuery;
use super::types::{Currency, DEFAULT_QUOTE_CURRENCY};
use crate::errors::MarketDataError;

/// Vendor request shape derived from a query.
///
/// Stocks use a quote-by-symbol request; crypto and forex use an
/// exchange-rate request. Commodities have no vendor request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VendorRequest {
    /// Latest quote for an exchange-traded symbol
    GlobalQuote { symbol: String },

    /// Realtime exchange rate between two currencies (fiat or crypto)
    ExchangeRate {
        from: Currency,
        to: Currency,
        asset_class: AssetClass,
    },
}

impl VendorRequest {
    /// Build the vendor request for a query.
    ///
    /// Forex text is split on `/`; when only one code is given the quote
    /// currency defaults to USD. Crypto is always priced in USD.
    pub fn for_query(query: &AssetQuery) -> Result<Self, MarketDataError> {
        let text = query.text().to_uppercase();
        if text.is_empty() {
            return Err(MarketDataError::SymbolNotFound(query.raw_text().to_string()));
        }

        match query.asset_class() {
            AssetClass::Stock => Ok(Self::GlobalQuote { symbol: text }),
            AssetClass::Crypto => Ok(Self::ExchangeRate {
                from: Cow::Owned(text),
                to: Cow::Borrowed(DEFAULT_QUOTE_CURRENCY),
                asset_class: AssetClass::Crypto,
            }),
            AssetClass::Forex => {
                let (from, to) = split_currency_pair(&text);
                Ok(Self::ExchangeRate {
                    from,
                    to,
                    asset_class: AssetClass::Forex,
                })
            }
            AssetClass::Commodity => Err(MarketDataError::UnsupportedAssetClass(
                AssetClass::Commodity.to_string(),
            )),
        }
    }

    /// Vendor function name.
    pub fn function(&self) -> &'static str {
        match self {
            Self::GlobalQuote { .. } => "GLOBAL_QUOTE",
            Self::ExchangeRate { .. } => "CURRENCY_EXCHANGE_RATE",
        }
    }

    /// Query parameters, excluding the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::GlobalQuote { symbol } => vec![
                ("function", self.function().to_string()),
                ("symbol", symbol.clone()),
            ],
            Self::ExchangeRate { from, to, .. } => vec![
                ("function", self.function().to_string()),
                ("from_currency", from.to_string()),
                ("to_currency", to.to_string()),
            ],
        }
    }

    pub fn asset_class(&self) -> AssetClass {
        match self {
            Self::GlobalQuote { .. } => AssetClass::Stock,
            Self::ExchangeRate { asset_class, .. } => *asset_class,
        }
    }

    /// Short label for logs ("AAPL", "EUR/USD").
    pub fn describe(&self) -> String {
        match self {
            Self::GlobalQuote { symbol } => symbol.clone(),
            Self::ExchangeRate { from, to, .. } => format!("{}/{}", from, to),
        }
    }
}

/// Split `BASE/QUOTE` text; a missing or empty quote becomes USD.
fn split_currency_pair(text: &str) -> (Currency, Currency) {
    let mut parts = text.split('/').map(str::trim);
    let from = parts.next().unwrap_or_default().to_string();
    let to = match parts.next() {
        Some(to) if !to.is_empty() => Cow::Owned(to.to_string()),
        _ => Cow::Borrowed(DEFAULT_QUOTE_CURRENCY),
    };
    (Cow::Owned(from), to)
}
