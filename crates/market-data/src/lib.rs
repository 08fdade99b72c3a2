//! Signal Market Data Crate
//!
//! This crate provides the asset vocabulary and the vendor tier of the
//! Signal asset resolver.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Four asset classes: stocks, crypto, forex, commodities
//! - Translating a user query into a vendor request shape
//! - Fetching and interpreting latest quotes from Alpha Vantage
//! - Validating and normalizing every candidate quote
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   AssetQuery     | --> |  VendorRequest   |  (GLOBAL_QUOTE / CURRENCY_EXCHANGE_RATE)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Alpha Vantage)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   Validation     |  (price > 0, canonical symbol)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   AssetQuote     |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`AssetClass`] - Stock, Crypto, Forex or Commodity
//! - [`AssetQuery`] - One user search
//! - [`AssetQuote`] - A validated quote (only constructible through validation)
//! - [`VendorRequest`] - Vendor request shape per asset class
//! - [`MarketDataError`] / [`FailureKind`] - Vendor faults and their classification

pub mod errors;
pub mod models;
pub mod provider;
pub mod validation;

pub use errors::{FailureKind, MarketDataError};

// Re-export all public types from models
pub use models::{
    AssetClass, AssetQuery, AssetQuote, Currency, QuoteSource, VendorRequest,
    DEFAULT_QUOTE_CURRENCY,
};

// Re-export provider types
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::{MarketDataProvider, ProviderCapabilities};
