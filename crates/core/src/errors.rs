//! Core error types for Signal.

use signal_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// The structured lookup service could not be reached or answered with
    /// something other than a JSON document.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Validation errors for user supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Shorthand for an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}
