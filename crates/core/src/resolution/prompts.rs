//! Prompt and response schema sent to the structured lookup service.

use serde_json::{json, Value};
use signal_market_data::{AssetClass, AssetQuery};

/// Build the class-specific lookup prompt for a query.
pub fn lookup_prompt(query: &AssetQuery) -> String {
    let text = query.text();
    let class = query.asset_class();
    let body = match class {
        AssetClass::Stock => format!(
            "Search for stock ticker information for: \"{}\". Return current price and company details.",
            text
        ),
        AssetClass::Crypto => format!(
            "Search for cryptocurrency information for: \"{}\". Return current price in USD, full name, and symbol. Examples: Bitcoin (BTC), Ethereum (ETH).",
            text
        ),
        AssetClass::Forex => format!(
            "Search for forex pair information for: \"{}\". Return current exchange rate and pair name. Examples: EUR/USD, GBP/JPY.",
            text
        ),
        AssetClass::Commodity => format!(
            "Search for commodity information for: \"{}\". Return current price and commodity name. Examples: Gold, Crude Oil, Natural Gas.",
            text
        ),
    };

    format!(
        "{} Answer with the fields symbol, displayName, price (a positive number) and assetClass (\"{}\").",
        body,
        class.as_str()
    )
}

/// JSON schema of the object the lookup service must return.
pub fn lookup_response_schema() -> Value {
    let classes: Vec<&str> = AssetClass::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "symbol": { "type": "string" },
            "displayName": { "type": "string" },
            "price": { "type": "number" },
            "assetClass": { "type": "string", "enum": classes }
        },
        "required": ["symbol", "displayName", "price", "assetClass"]
    })
}
