//! HTTP inbound adapter exposing the portal pages and JSON API.

pub mod analyze;
pub mod error;
pub mod health;
pub mod medical_research;
pub mod pages;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
