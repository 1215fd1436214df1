//! Driven port for the LLM that narrates literature against a clinical case.

use async_trait::async_trait;

use super::{define_port_error, impl_upstream_error};
use crate::domain::NarrationRequest;

define_port_error! {
    /// Errors surfaced while calling the narrator.
    pub enum LiteratureNarratorError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "narrator transport failed: {message}",
        /// The narrator did not answer within the outbound timeout.
        Timeout { message: String } =>
            "narrator timeout: {message}",
        /// The narrator answered with a non-success status.
        Status { status: u16, message: String } =>
            "narrator returned status {status}: {message}",
        /// The narrator response body could not be decoded.
        Decode { message: String } =>
            "narrator response decode failed: {message}",
    }
}

impl_upstream_error!(LiteratureNarratorError);

/// Port for producing a free-text literature analysis.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiteratureNarrator: Send + Sync {
    /// Return the narrator's text for the prompt pair. A response without a
    /// leading text block yields an empty string.
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, LiteratureNarratorError>;
}

/// Fixture narrator returning a constant paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureLiteratureNarrator;

#[async_trait]
impl LiteratureNarrator for FixtureLiteratureNarrator {
    async fn narrate(&self, _request: &NarrationRequest) -> Result<String, LiteratureNarratorError> {
        Ok("No additional literature guidance.".to_owned())
    }
}
