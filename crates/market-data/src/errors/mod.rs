//! Error types and failure classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for vendor and validation faults
//! - [`FailureKind`]: Classification that drives the tier fall-through

mod failure;

pub use failure::FailureKind;

use thiserror::Error;

/// Errors that can occur while building, issuing or interpreting a vendor request.
///
/// Each variant is classified into a [`FailureKind`] via the
/// [`failure_kind`](Self::failure_kind) method.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The vendor reported the symbol as invalid or unknown.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The asset class is not served by the vendor, or could not be parsed.
    #[error("Unsupported asset class: {0}")]
    UnsupportedAssetClass(String),

    /// No vendor API key was supplied.
    #[error("Missing API key for provider {provider}")]
    MissingApiKey {
        /// The provider that needs a key
        provider: String,
    },

    /// The vendor rejected the call because of quota (HTTP 429 or a "Note").
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The vendor answered with an empty body or an empty JSON object.
    #[error("Empty response: {provider}")]
    EmptyResponse {
        /// The provider that returned no data
        provider: String,
    },

    /// A provider-specific error occurred (error payload, HTTP status, malformed body).
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// Extracted data failed validation (non-positive price, empty symbol).
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the failure classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use signal_market_data::errors::{FailureKind, MarketDataError};
    ///
    /// let error = MarketDataError::RateLimited { provider: "ALPHA_VANTAGE".to_string() };
    /// assert_eq!(error.failure_kind(), FailureKind::SoftVendor);
    ///
    /// let error = MarketDataError::Timeout { provider: "ALPHA_VANTAGE".to_string() };
    /// assert_eq!(error.failure_kind(), FailureKind::Transport);
    /// ```
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::SymbolNotFound(_)
            | Self::UnsupportedAssetClass(_)
            | Self::MissingApiKey { .. }
            | Self::RateLimited { .. }
            | Self::EmptyResponse { .. }
            | Self::ProviderError { .. }
            | Self::ValidationFailed { .. } => FailureKind::SoftVendor,

            Self::Timeout { .. } | Self::Network(_) => FailureKind::Transport,
        }
    }

    /// True when the vendor returned something we could not interpret,
    /// as opposed to refusing or having no data.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
            || matches!(self, Self::ProviderError { message, .. } if message.starts_with("Failed to parse"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_not_found_is_soft() {
        let error = MarketDataError::SymbolNotFound("ZZZZ".to_string());
        assert_eq!(error.failure_kind(), FailureKind::SoftVendor);
        assert!(error.failure_kind().falls_through());
    }

    #[test]
    fn test_rate_limited_is_soft() {
        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(error.failure_kind(), FailureKind::SoftVendor);
    }

    #[test]
    fn test_timeout_is_transport() {
        let error = MarketDataError::Timeout {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(error.failure_kind(), FailureKind::Transport);
        assert!(error.failure_kind().falls_through());
    }

    #[test]
    fn test_lookup_kind_is_terminal() {
        assert!(!FailureKind::Lookup.falls_through());
    }

    #[test]
    fn test_invalid_data_detection() {
        assert!(MarketDataError::validation("price must be positive").is_invalid_data());
        assert!(MarketDataError::ProviderError {
            provider: "ALPHA_VANTAGE".to_string(),
            message: "Failed to parse response: EOF".to_string(),
        }
        .is_invalid_data());
        assert!(!MarketDataError::EmptyResponse {
            provider: "ALPHA_VANTAGE".to_string(),
        }
        .is_invalid_data());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("INVALID".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: INVALID");

        let error = MarketDataError::ProviderError {
            provider: "ALPHA_VANTAGE".to_string(),
            message: "API key invalid".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Provider error: ALPHA_VANTAGE - API key invalid"
        );
    }
}
