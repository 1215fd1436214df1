//! Geriatrics residency portal.
//!
//! Hexagonal layout: `domain` holds the clinical and literature rules plus
//! the ports, `outbound` the HTTP clients for the analyzer, the SZMC library
//! and the LLM narrator, and `inbound::http` the actix-web handlers.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
