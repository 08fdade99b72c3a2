use serde::Serialize;

/// Classification of a failure within the resolution pipeline.
///
/// # Behavior Summary
///
/// | Kind | Vendor tier | Lookup tier |
/// |------|-------------|-------------|
/// | `SoftVendor` | Fall through to lookup | n/a |
/// | `Lookup` | n/a | Terminal, reported as not found |
/// | `Transport` | Treated as `SoftVendor` | Treated as `Lookup`, message kept |
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Vendor key missing, quota or error payload, malformed payload,
    /// or an extracted price that failed validation.
    SoftVendor,

    /// The lookup service returned nothing usable.
    Lookup,

    /// Network, timeout or body parse fault at either tier.
    Transport,
}

impl FailureKind {
    /// Whether the next tier should be attempted after a vendor failure of this kind.
    pub fn falls_through(&self) -> bool {
        matches!(self, Self::SoftVendor | Self::Transport)
    }
}
