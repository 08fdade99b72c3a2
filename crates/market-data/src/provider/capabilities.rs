//! Provider capabilities.
//!
//! Describes which asset classes a vendor can quote so the resolver can
//! skip the vendor tier without issuing a request.

use crate::models::AssetClass;

/// Describes the capabilities of a quote vendor.
#[derive(Clone, Debug)]
pub struct ProviderCapabilities {
    /// Asset classes this provider can quote.
    pub asset_classes: &'static [AssetClass],
}

impl ProviderCapabilities {
    pub fn supports(&self, asset_class: AssetClass) -> bool {
        self.asset_classes.contains(&asset_class)
    }
}
