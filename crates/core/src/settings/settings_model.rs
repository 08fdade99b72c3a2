use serde::{Deserialize, Serialize};

/// API keys entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeys {
    #[serde(default)]
    pub alpha_vantage: Option<String>,
    #[serde(default)]
    pub huggingface: Option<String>,
}

impl ApiKeys {
    /// Copy safe to send back to a client: every key reduced to its last
    /// four characters.
    pub fn masked(&self) -> ApiKeys {
        ApiKeys {
            alpha_vantage: self.alpha_vantage.as_deref().map(mask_secret),
            huggingface: self.huggingface.as_deref().map(mask_secret),
        }
    }
}

/// User settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_keys: ApiKeys,
}

impl Settings {
    /// Trimmed vendor key, or `None` when unset or blank.
    pub fn vendor_api_key(&self) -> Option<&str> {
        non_blank(self.api_keys.alpha_vantage.as_deref())
    }

    /// Trimmed lookup service key, or `None` when unset or blank.
    pub fn lookup_api_key(&self) -> Option<&str> {
        non_blank(self.api_keys.huggingface.as_deref())
    }

    pub fn masked(&self) -> Settings {
        Settings {
            api_keys: self.api_keys.masked(),
        }
    }
}

/// Partial update of the API keys.
///
/// An absent field leaves the key untouched; an empty string clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeysUpdate {
    pub alpha_vantage: Option<String>,
    pub huggingface: Option<String>,
}

impl ApiKeysUpdate {
    pub fn apply(&self, keys: &mut ApiKeys) {
        if let Some(value) = &self.alpha_vantage {
            keys.alpha_vantage = normalize_key(value);
        }
        if let Some(value) = &self.huggingface {
            keys.huggingface = normalize_key(value);
        }
    }
}

fn normalize_key(value: &str) -> Option<String> {
    non_blank(Some(value)).map(str::to_string)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_key_is_trimmed_and_blank_is_none() {
        let mut settings = Settings::default();
        assert_eq!(settings.vendor_api_key(), None);

        settings.api_keys.alpha_vantage = Some("  ".to_string());
        assert_eq!(settings.vendor_api_key(), None);

        settings.api_keys.alpha_vantage = Some(" DEMO123 ".to_string());
        assert_eq!(settings.vendor_api_key(), Some("DEMO123"));
    }

    #[test]
    fn update_sets_clears_and_keeps() {
        let mut keys = ApiKeys {
            alpha_vantage: Some("old".to_string()),
            huggingface: Some("hf_token".to_string()),
        };

        ApiKeysUpdate {
            alpha_vantage: Some(" new-key ".to_string()),
            huggingface: None,
        }
        .apply(&mut keys);
        assert_eq!(keys.alpha_vantage.as_deref(), Some("new-key"));
        assert_eq!(keys.huggingface.as_deref(), Some("hf_token"));

        ApiKeysUpdate {
            alpha_vantage: None,
            huggingface: Some(String::new()),
        }
        .apply(&mut keys);
        assert_eq!(keys.alpha_vantage.as_deref(), Some("new-key"));
        assert_eq!(keys.huggingface, None);
    }

    #[test]
    fn masking_keeps_last_four() {
        let keys = ApiKeys {
            alpha_vantage: Some("ABCDEFGH".to_string()),
            huggingface: Some("xyz".to_string()),
        };
        let masked = keys.masked();
        assert_eq!(masked.alpha_vantage.as_deref(), Some("****EFGH"));
        assert_eq!(masked.huggingface.as_deref(), Some("***"));
    }

    #[test]
    fn deserializes_partial_documents() {
        let settings: Settings =
            serde_json::from_str(r#"{"apiKeys":{"alphaVantage":"KEY"}}"#).unwrap();
        assert_eq!(settings.vendor_api_key(), Some("KEY"));
        assert_eq!(settings.api_keys.huggingface, None);

        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
