use serde::{Deserialize, Serialize};

use super::asset_class::AssetClass;

/// A single user-initiated search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuery {
    raw_text: String,
    asset_class: AssetClass,
}

impl AssetQuery {
    pub fn new(raw_text: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            raw_text: raw_text.into(),
            asset_class,
        }
    }

    /// The text exactly as the user typed it.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Trimmed search text.
    pub fn text(&self) -> &str {
        self.raw_text.trim()
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }
}
