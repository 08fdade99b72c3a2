use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use signal_market_data::AssetClass;

/// Entry kind chosen when adding a resolved asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    #[default]
    Portfolio,
    Watchlist,
}

/// User input for a new portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    #[serde(default)]
    pub kind: EntryKind,
    #[serde(default)]
    pub shares: Option<Decimal>,
    #[serde(default)]
    pub avg_cost: Option<Decimal>,
}

/// A tracked asset, either held or only watched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionEntry {
    pub ticker: String,
    pub company_name: String,
    pub market_type: AssetClass,
    pub shares: Decimal,
    pub avg_cost: Decimal,
    pub current_price: Decimal,
    pub market_value: Decimal,
    /// Gain over average cost, in percent.
    pub change_percent: Decimal,
    pub is_watchlist: bool,
}
