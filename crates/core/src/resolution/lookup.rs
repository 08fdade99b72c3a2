//! Port to the natural-language structured lookup service.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signal_market_data::validation::{parse_price, price_from_f64};
use signal_market_data::{AssetClass, AssetQuery, AssetQuote, MarketDataError, QuoteSource};

use crate::errors::Result;

/// A single structured lookup invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub prompt: String,
    pub response_schema: Value,
    /// Whether the service may consult the internet.
    pub allow_external_context: bool,
}

/// Natural-language lookup service returning JSON shaped by a schema.
///
/// Implementations return `Err` only for transport faults. A service that
/// found nothing answers with an empty or degenerate object.
#[async_trait]
pub trait AssetLookupService: Send + Sync {
    /// Identifier used in diagnostics and logs.
    fn id(&self) -> &'static str;

    async fn invoke(&self, request: &LookupRequest) -> Result<Value>;
}

/// Loose view of the lookup answer. Services drift from the schema, so
/// every field is optional and a few legacy names are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupCandidate {
    #[serde(default, alias = "ticker")]
    symbol: Option<String>,
    #[serde(default, alias = "name", alias = "company_name", alias = "display_name")]
    display_name: Option<String>,
    #[serde(default, alias = "current_price")]
    price: Option<Value>,
    #[serde(default, alias = "market_type", alias = "asset_class")]
    asset_class: Option<String>,
}

/// Turn a raw lookup answer into a validated quote.
///
/// A missing or unrecognized `assetClass` falls back to the query's class.
pub fn interpret_lookup_response(
    value: &Value,
    query: &AssetQuery,
) -> std::result::Result<AssetQuote, MarketDataError> {
    let object = match value.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return Err(MarketDataError::validation("lookup returned no data")),
    };

    let candidate: LookupCandidate = serde_json::from_value(Value::Object(object.clone()))
        .map_err(|e| MarketDataError::validation(format!("unexpected lookup shape: {}", e)))?;

    let symbol = candidate
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| MarketDataError::validation("lookup returned no symbol"))?;

    let price = candidate_price(candidate.price.as_ref())?;

    let asset_class = candidate
        .asset_class
        .as_deref()
        .and_then(|raw| raw.parse::<AssetClass>().ok())
        .unwrap_or_else(|| query.asset_class());

    AssetQuote::new(
        symbol,
        candidate.display_name.as_deref().unwrap_or_default(),
        price,
        asset_class,
        QuoteSource::Lookup,
    )
}

fn candidate_price(raw: Option<&Value>) -> std::result::Result<Decimal, MarketDataError> {
    match raw {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(price) => price_from_f64(price),
            None => Err(MarketDataError::validation("price is not representable")),
        },
        Some(Value::String(text)) => parse_price(text.trim().trim_start_matches('$')),
        _ => Err(MarketDataError::validation("lookup returned no price")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn query(text: &str, class: AssetClass) -> AssetQuery {
        AssetQuery::new(text, class)
    }

    #[test]
    fn accepts_schema_shaped_answer() {
        let value = json!({
            "symbol": "btc",
            "displayName": "Bitcoin",
            "price": 67000.0,
            "assetClass": "crypto"
        });
        let quote = interpret_lookup_response(&value, &query("bitcoin", AssetClass::Crypto)).unwrap();
        assert_eq!(quote.symbol(), "BTC");
        assert_eq!(quote.display_name(), "Bitcoin");
        assert_eq!(quote.price(), dec!(67000));
        assert_eq!(quote.asset_class(), AssetClass::Crypto);
        assert_eq!(quote.source(), &QuoteSource::Lookup);
    }

    #[test]
    fn missing_asset_class_defaults_to_query_class() {
        let value = json!({ "symbol": "GOLD", "displayName": "Gold", "price": 2300.5 });
        let quote = interpret_lookup_response(&value, &query("gold", AssetClass::Commodity)).unwrap();
        assert_eq!(quote.asset_class(), AssetClass::Commodity);

        let value = json!({ "symbol": "GOLD", "price": 2300.5, "assetClass": "metal" });
        let quote = interpret_lookup_response(&value, &query("gold", AssetClass::Commodity)).unwrap();
        assert_eq!(quote.asset_class(), AssetClass::Commodity);
        assert_eq!(quote.display_name(), "GOLD");
    }

    #[test]
    fn accepts_string_price_and_legacy_field_names() {
        let value = json!({
            "ticker": "aapl",
            "company_name": "Apple Inc.",
            "current_price": "$189.40",
            "market_type": "stock"
        });
        let quote = interpret_lookup_response(&value, &query("apple", AssetClass::Stock)).unwrap();
        assert_eq!(quote.symbol(), "AAPL");
        assert_eq!(quote.display_name(), "Apple Inc.");
        assert_eq!(quote.price(), dec!(189.40));
    }

    #[test]
    fn forex_symbol_is_normalized_to_pair() {
        let value = json!({ "symbol": "eurusd", "price": 1.08, "assetClass": "forex" });
        let quote = interpret_lookup_response(&value, &query("euro", AssetClass::Forex)).unwrap();
        assert_eq!(quote.symbol(), "EUR/USD");
    }

    #[test]
    fn rejects_degenerate_answers() {
        let q = query("zzzz", AssetClass::Stock);
        assert!(interpret_lookup_response(&json!({}), &q).is_err());
        assert!(interpret_lookup_response(&json!(null), &q).is_err());
        assert!(interpret_lookup_response(&json!([1, 2]), &q).is_err());
        assert!(interpret_lookup_response(&json!({ "symbol": "", "price": 10 }), &q).is_err());
        assert!(interpret_lookup_response(&json!({ "symbol": "ZZZZ" }), &q).is_err());
        assert!(interpret_lookup_response(&json!({ "symbol": "ZZZZ", "price": 0 }), &q).is_err());
        assert!(interpret_lookup_response(&json!({ "symbol": "ZZZZ", "price": -3.5 }), &q).is_err());
        assert!(
            interpret_lookup_response(&json!({ "symbol": "ZZZZ", "price": "n/a" }), &q).is_err()
        );
        assert!(interpret_lookup_response(&json!({ "symbol": "ZZZZ", "price": null }), &q).is_err());
    }
}
