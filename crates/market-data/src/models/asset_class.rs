use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Asset classification chosen by the user when searching.
///
/// Determines the vendor request shape, the lookup prompt and how the
/// resolved symbol is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    #[default]
    Stock,
    Crypto,
    Forex,
    Commodity,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Stock,
        AssetClass::Crypto,
        AssetClass::Forex,
        AssetClass::Commodity,
    ];

    /// Wire name (`stock`, `crypto`, `forex`, `commodity`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Crypto => "crypto",
            Self::Forex => "forex",
            Self::Commodity => "commodity",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stock => "Stock",
            Self::Crypto => "Cryptocurrency",
            Self::Forex => "Forex Pair",
            Self::Commodity => "Commodity",
        }
    }

    /// Label for the quantity field when adding a position.
    pub fn quantity_label(&self) -> &'static str {
        match self {
            Self::Forex => "Units",
            Self::Crypto => "Amount",
            Self::Stock | Self::Commodity => "Shares/Contracts",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" | "stocks" | "equity" => Ok(Self::Stock),
            "crypto" | "cryptocurrency" => Ok(Self::Crypto),
            "forex" | "fx" => Ok(Self::Forex),
            "commodity" | "commodities" => Ok(Self::Commodity),
            other => Err(MarketDataError::UnsupportedAssetClass(other.to_string())),
        }
    }
}
