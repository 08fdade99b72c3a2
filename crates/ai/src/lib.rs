//! Signal AI - structured LLM lookup.
//!
//! This crate implements the lookup tier of the asset resolver: a client
//! for a hosted "invoke LLM" endpoint that answers a prompt with JSON shaped
//! by a schema, optionally consulting the internet.
//!
//! # Architecture
//!
//! - `lookup_client`: HTTP client implementing `AssetLookupService`
//! - `fake`: Deterministic lookup service for tests and local runs
//! - `error`: Client error type with stable codes
//!
//! # Example
//!
//! ```ignore
//! use signal_ai::{LlmLookupClient, LlmLookupConfig};
//!
//! let client = LlmLookupClient::new(LlmLookupConfig {
//!     endpoint: "https://llm.example.com/invoke".to_string(),
//!     ..Default::default()
//! });
//! let resolver = AssetResolver::new(vendor, Arc::new(client));
//! ```

pub mod error;
pub mod fake;
pub mod lookup_client;

pub use error::AiError;
pub use fake::FakeLookupService;
pub use lookup_client::{LlmLookupClient, LlmLookupConfig, DEFAULT_LOOKUP_TIMEOUT};
