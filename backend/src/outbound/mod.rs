//! Outbound adapters implementing the driven ports over HTTP.
//!
//! - **analyzer**: the clinical NLP analyzer service
//! - **library**: the SZMC medical e-library
//! - **anthropic**: the Anthropic Messages API used for literature narration
//!
//! Adapters translate between domain types and wire DTOs and map transport
//! failures into port errors. They contain no business logic.

pub mod analyzer;
pub mod anthropic;
mod http_support;
pub mod library;

pub use http_support::HttpAdapterBuildError;
