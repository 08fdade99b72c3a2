//! Lookup client error types.

use signal_core::Error as CoreError;
use thiserror::Error;

/// Lookup client errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    /// Endpoint not configured.
    #[error("Lookup endpoint is not configured")]
    NotConfigured,

    /// Non-success answer from the endpoint.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The endpoint did not answer in time.
    #[error("Lookup timed out after {0}s")]
    Timeout(u64),

    /// Connection level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Body was not JSON.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

/// Error code for programmatic handling.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::NotConfigured => "NOT_CONFIGURED",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::Timeout(_) => "TIMEOUT",
            AiError::Network(_) => "NETWORK_ERROR",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        CoreError::Lookup(err.to_string())
    }
}
