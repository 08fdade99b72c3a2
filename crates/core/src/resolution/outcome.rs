use std::fmt;

use serde::Serialize;
use signal_market_data::{AssetQuote, FailureKind, MarketDataError};

/// Notice shown when the lookup tier found nothing and the vendor tier had
/// nothing to say.
pub const LOOKUP_NOT_FOUND_NOTICE: &str =
    "AI search failed to find valid data. Please try a different query.";

/// Result of one resolution call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Resolved(AssetQuote),
    /// Vendor tier failed softly; only produced by the vendor stage.
    VendorUnavailable(String),
    NotFound { reason: Option<String> },
}

impl ResolutionOutcome {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: Some(reason.into()),
        }
    }

    pub fn quote(&self) -> Option<&AssetQuote> {
        match self {
            Self::Resolved(quote) => Some(quote),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolution tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Vendor,
    Lookup,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Vendor => write!(f, "vendor"),
            Tier::Lookup => write!(f, "lookup"),
        }
    }
}

/// Why a tier was not attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// Query text was empty after trimming.
    BlankQuery,
    /// No vendor API key configured.
    MissingApiKey,
    /// The vendor does not serve the asset class.
    UnsupportedAssetClass,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankQuery => write!(f, "blank query"),
            SkipReason::MissingApiKey => write!(f, "missing API key"),
            SkipReason::UnsupportedAssetClass => write!(f, "unsupported asset class"),
        }
    }
}

/// One entry of the per-tier attempt log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAttempt {
    pub tier: Tier,
    pub provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

/// Outcome of a resolution with its attempt log and user notice.
///
/// `notice` holds the transient message shown to the user; it is cleared
/// when the resolution succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolutionReport {
    pub outcome: ResolutionOutcome,
    pub attempts: Vec<TierAttempt>,
    pub notice: Option<String>,
}

impl ResolutionReport {
    pub(crate) fn new() -> Self {
        Self {
            outcome: ResolutionOutcome::NotFound { reason: None },
            attempts: Vec::new(),
            notice: None,
        }
    }

    pub(crate) fn record_skip(&mut self, tier: Tier, provider_id: &str, reason: SkipReason) {
        self.attempts.push(TierAttempt {
            tier,
            provider_id: provider_id.to_string(),
            skipped: Some(reason),
            failure: None,
            error: None,
            success: false,
        });
    }

    pub(crate) fn record_failure(
        &mut self,
        tier: Tier,
        provider_id: &str,
        failure: FailureKind,
        error: impl Into<String>,
    ) {
        self.attempts.push(TierAttempt {
            tier,
            provider_id: provider_id.to_string(),
            skipped: None,
            failure: Some(failure),
            error: Some(error.into()),
            success: false,
        });
    }

    pub(crate) fn record_vendor_error(&mut self, provider_id: &str, error: &MarketDataError) {
        self.record_failure(Tier::Vendor, provider_id, error.failure_kind(), error.to_string());
    }

    pub(crate) fn record_success(&mut self, tier: Tier, provider_id: &str) {
        self.attempts.push(TierAttempt {
            tier,
            provider_id: provider_id.to_string(),
            skipped: None,
            failure: None,
            error: None,
            success: true,
        });
    }

    /// Whether an outbound call was made to the given tier.
    pub fn attempted(&self, tier: Tier) -> bool {
        self.attempts
            .iter()
            .any(|a| a.tier == tier && a.skipped.is_none())
    }

    pub fn attempt(&self, tier: Tier) -> Option<&TierAttempt> {
        self.attempts.iter().find(|a| a.tier == tier)
    }
}

impl Default for ResolutionReport {
    fn default() -> Self {
        Self::new()
    }
}
