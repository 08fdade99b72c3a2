//! Asset models
//!
//! This module contains the shared vocabulary of the resolution pipeline:
//! - `types` - Type aliases for common identifiers (Currency)
//! - `asset_class` - The user's asset-class hint (AssetClass)
//! - `query` - A single search request (AssetQuery)
//! - `quote` - Validated quote data (AssetQuote, QuoteSource)
//! - `vendor_request` - Vendor request shapes (VendorRequest)

mod asset_class;
mod query;
mod quote;
mod types;
mod vendor_request;

pub use asset_class::AssetClass;
pub use query::AssetQuery;
pub use quote::{AssetQuote, QuoteSource};
pub use types::{Currency, DEFAULT_QUOTE_CURRENCY};
pub use vendor_request::VendorRequest;
