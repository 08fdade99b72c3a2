//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that the vendor
//! tier is written against.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{AssetQuote, VendorRequest};

use super::capabilities::ProviderCapabilities;

/// Trait for quote vendors.
///
/// The API key is passed on every call rather than held by the provider,
/// so one provider instance can serve every user.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use signal_market_data::provider::{MarketDataProvider, ProviderCapabilities};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities {
///             asset_classes: &[AssetClass::Stock],
///         }
///     }
///
///     // ... implement get_latest_quote
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider ("ALPHA_VANTAGE").
    ///
    /// Used for logging and recorded on the quote source.
    fn id(&self) -> &'static str;

    /// Human readable name used in user-facing notices.
    ///
    /// Defaults to the provider id.
    fn name(&self) -> &'static str {
        self.id()
    }

    /// Describes which asset classes this provider can quote.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Fetch the latest quote for a vendor request.
    ///
    /// # Arguments
    ///
    /// * `request` - Request shape built from the user's query
    /// * `api_key` - The caller's vendor API key (never empty)
    ///
    /// # Returns
    ///
    /// A validated quote on success, or a `MarketDataError` describing why
    /// the vendor could not answer.
    async fn get_latest_quote(
        &self,
        request: &VendorRequest,
        api_key: &str,
    ) -> Result<AssetQuote, MarketDataError>;
}
