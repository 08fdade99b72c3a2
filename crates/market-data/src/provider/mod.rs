//! Quote vendor abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that vendors implement
//! - Provider capabilities
//! - The Alpha Vantage implementation
//!
//! Providers receive a pre-built [`VendorRequest`](crate::models::VendorRequest);
//! translating the user's query into a request shape happens in the models
//! module, not in the providers themselves.

mod capabilities;
mod traits;

pub mod alpha_vantage;

// Re-exports
pub use capabilities::ProviderCapabilities;
pub use traits::MarketDataProvider;
