//! Driven port for the SZMC medical e-library.

use async_trait::async_trait;

use super::{define_port_error, impl_upstream_error};
use crate::domain::{ArticleId, LibrarySearchParams, MedicalArticle};

define_port_error! {
    /// Errors surfaced while calling the library.
    pub enum MedicalLibraryError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "library transport failed: {message}",
        /// The library did not answer within the outbound timeout.
        Timeout { message: String } =>
            "library timeout: {message}",
        /// The library answered with a non-success status.
        Status { status: u16, message: String } =>
            "library returned status {status}: {message}",
        /// The library response body could not be decoded.
        Decode { message: String } =>
            "library response decode failed: {message}",
    }
}

impl_upstream_error!(MedicalLibraryError);

/// Port for searching and fetching library articles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MedicalLibrary: Send + Sync {
    /// Run a search. Unset parameters fall back to the library defaults.
    async fn search(
        &self,
        params: &LibrarySearchParams,
    ) -> Result<Vec<MedicalArticle>, MedicalLibraryError>;

    /// Fetch one article, returning `None` when the library does not know it.
    async fn article(&self, id: &ArticleId) -> Result<Option<MedicalArticle>, MedicalLibraryError>;
}

/// Fixture library with no articles.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMedicalLibrary;

#[async_trait]
impl MedicalLibrary for FixtureMedicalLibrary {
    async fn search(
        &self,
        _params: &LibrarySearchParams,
    ) -> Result<Vec<MedicalArticle>, MedicalLibraryError> {
        Ok(Vec::new())
    }

    async fn article(&self, _id: &ArticleId) -> Result<Option<MedicalArticle>, MedicalLibraryError> {
        Ok(None)
    }
}
