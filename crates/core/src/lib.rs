//! Signal Core - Asset resolution, settings and position valuation.
//!
//! This crate holds the business logic of the Signal asset resolver. It is
//! transport-agnostic: the vendor tier comes from `signal-market-data` and
//! the structured lookup tier is a port implemented by `signal-ai`.

pub mod errors;
pub mod portfolio;
pub mod resolution;
pub mod settings;

pub use resolution::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
