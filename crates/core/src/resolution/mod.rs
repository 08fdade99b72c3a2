//! Asset resolution: vendor tier first, structured lookup as fallback.
//!
//! ```text
//!   AssetQuery ──► Eligibility ──► Vendor ──► Lookup ──► Done
//!                       │            │                     ▲
//!                       └── skip ────┼─────────────────────┤
//!                                    └── Resolved ─────────┘
//! ```

mod lookup;
mod outcome;
mod prompts;
mod resolver;
mod search_session;


pub use lookup::{interpret_lookup_response, AssetLookupService, LookupRequest};
pub use outcome::{
    ResolutionOutcome, ResolutionReport, SkipReason, Tier, TierAttempt, LOOKUP_NOT_FOUND_NOTICE,
};
pub use prompts::{lookup_prompt, lookup_response_schema};
pub use resolver::AssetResolver;
pub use search_session::{SearchSession, SearchTicket};
