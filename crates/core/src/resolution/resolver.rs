use std::sync::Arc;

use log::{debug, info, warn};
use signal_market_data::{
    AssetClass, AssetQuery, FailureKind, MarketDataError, MarketDataProvider, VendorRequest,
};

use super::lookup::{interpret_lookup_response, AssetLookupService, LookupRequest};
use super::outcome::{
    ResolutionOutcome, ResolutionReport, SkipReason, Tier, LOOKUP_NOT_FOUND_NOTICE,
};
use super::prompts::{lookup_prompt, lookup_response_schema};

/// Pipeline position. Each step either hands over to the next stage or
/// finishes with an outcome.
enum Stage<'k> {
    Eligibility,
    Vendor(&'k str),
    Lookup,
    Done(ResolutionOutcome),
}

/// Resolves a free-text query into a validated quote.
///
/// The vendor tier is tried first when it can serve the asset class and a
/// key is supplied. Any vendor failure falls through to the structured
/// lookup tier. Each tier is called at most once per resolution and no
/// fault escapes: every call ends in a [`ResolutionOutcome`].
pub struct AssetResolver {
    vendor: Arc<dyn MarketDataProvider>,
    lookup: Arc<dyn AssetLookupService>,
}

impl AssetResolver {
    pub fn new(vendor: Arc<dyn MarketDataProvider>, lookup: Arc<dyn AssetLookupService>) -> Self {
        Self { vendor, lookup }
    }

    /// Resolve a query. Returns `Resolved` or `NotFound`.
    pub async fn resolve(
        &self,
        query: &AssetQuery,
        vendor_api_key: Option<&str>,
    ) -> ResolutionOutcome {
        self.resolve_detailed(query, vendor_api_key).await.outcome
    }

    /// Resolve a query and keep the per-tier attempt log and user notice.
    pub async fn resolve_detailed(
        &self,
        query: &AssetQuery,
        vendor_api_key: Option<&str>,
    ) -> ResolutionReport {
        let mut report = ResolutionReport::new();
        let mut stage = Stage::Eligibility;

        loop {
            stage = match stage {
                Stage::Eligibility => self.check_eligibility(query, vendor_api_key, &mut report),
                Stage::Vendor(api_key) => {
                    match self.attempt_vendor(query, api_key, &mut report).await {
                        ResolutionOutcome::Resolved(quote) => {
                            Stage::Done(ResolutionOutcome::Resolved(quote))
                        }
                        _ => Stage::Lookup,
                    }
                }
                Stage::Lookup => Stage::Done(self.attempt_lookup(query, &mut report).await),
                Stage::Done(outcome) => {
                    if outcome.is_resolved() {
                        report.notice = None;
                    }
                    report.outcome = outcome;
                    return report;
                }
            };
        }
    }

    fn check_eligibility<'k>(
        &self,
        query: &AssetQuery,
        vendor_api_key: Option<&'k str>,
        report: &mut ResolutionReport,
    ) -> Stage<'k> {
        let vendor_id = self.vendor.id();

        if query.is_blank() {
            debug!("Ignoring blank asset query");
            report.record_skip(Tier::Vendor, vendor_id, SkipReason::BlankQuery);
            report.record_skip(Tier::Lookup, self.lookup.id(), SkipReason::BlankQuery);
            return Stage::Done(ResolutionOutcome::not_found("empty query"));
        }

        let asset_class = query.asset_class();
        if asset_class == AssetClass::Commodity || !self.vendor.capabilities().supports(asset_class)
        {
            debug!(
                "{} does not serve {}, skipping to lookup",
                vendor_id, asset_class
            );
            report.record_skip(Tier::Vendor, vendor_id, SkipReason::UnsupportedAssetClass);
            return Stage::Lookup;
        }

        match vendor_api_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => Stage::Vendor(key),
            None => {
                debug!("No {} API key configured, skipping to lookup", vendor_id);
                report.record_skip(Tier::Vendor, vendor_id, SkipReason::MissingApiKey);
                report.notice = Some(format!(
                    "Add {} API key in Settings for real-time data. Falling back to AI search.",
                    self.vendor.name()
                ));
                Stage::Lookup
            }
        }
    }

    /// Single vendor call. Yields `Resolved` or `VendorUnavailable`.
    async fn attempt_vendor(
        &self,
        query: &AssetQuery,
        api_key: &str,
        report: &mut ResolutionReport,
    ) -> ResolutionOutcome {
        let vendor_id = self.vendor.id();

        let request = match VendorRequest::for_query(query) {
            Ok(request) => request,
            Err(e) => return self.vendor_unavailable(e, report),
        };

        debug!("Requesting {} from {}", request.describe(), vendor_id);

        match self.vendor.get_latest_quote(&request, api_key).await {
            Ok(quote) => {
                info!(
                    "Resolved '{}' via {}: {} @ {}",
                    query.text(),
                    vendor_id,
                    quote.symbol(),
                    quote.price()
                );
                report.record_success(Tier::Vendor, vendor_id);
                ResolutionOutcome::Resolved(quote)
            }
            Err(e) => {
                warn!(
                    "{} failed for '{}' ({:?}): {}",
                    vendor_id,
                    query.text(),
                    e.failure_kind(),
                    e
                );
                self.vendor_unavailable(e, report)
            }
        }
    }

    fn vendor_unavailable(
        &self,
        error: MarketDataError,
        report: &mut ResolutionReport,
    ) -> ResolutionOutcome {
        report.record_vendor_error(self.vendor.id(), &error);

        let detail = if error.is_invalid_data() {
            "Failed to parse data or data invalid"
        } else {
            "Invalid symbol, API limit reached, or no data"
        };
        report.notice = Some(format!(
            "{}: {}. Falling back to AI search.",
            self.vendor.name(),
            detail
        ));

        ResolutionOutcome::VendorUnavailable(error.to_string())
    }

    /// Single lookup call. Yields `Resolved` or `NotFound`.
    async fn attempt_lookup(
        &self,
        query: &AssetQuery,
        report: &mut ResolutionReport,
    ) -> ResolutionOutcome {
        let lookup_id = self.lookup.id();
        let request = LookupRequest {
            prompt: lookup_prompt(query),
            response_schema: lookup_response_schema(),
            allow_external_context: true,
        };

        let value = match self.lookup.invoke(&request).await {
            Ok(value) => value,
            Err(e) => {
                let message = e.to_string();
                warn!("{} failed for '{}': {}", lookup_id, query.text(), message);
                report.record_failure(Tier::Lookup, lookup_id, FailureKind::Transport, &message);
                report.notice = Some(message.clone());
                return ResolutionOutcome::not_found(message);
            }
        };

        match interpret_lookup_response(&value, query) {
            Ok(quote) => {
                info!(
                    "Resolved '{}' via {}: {} @ {}",
                    query.text(),
                    lookup_id,
                    quote.symbol(),
                    quote.price()
                );
                report.record_success(Tier::Lookup, lookup_id);
                ResolutionOutcome::Resolved(quote)
            }
            Err(e) => {
                debug!("{} found nothing usable for '{}': {}", lookup_id, query.text(), e);
                report.record_failure(Tier::Lookup, lookup_id, FailureKind::Lookup, e.to_string());
                if report.notice.is_none() {
                    report.notice = Some(LOOKUP_NOT_FOUND_NOTICE.to_string());
                }
                ResolutionOutcome::not_found(e.to_string())
            }
        }
    }
}
