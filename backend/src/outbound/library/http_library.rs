//! Reqwest-backed SZMC library adapter.
//!
//! Every request carries the portal user agent plus whichever credentials are
//! configured. Search returns articles in library order; an unknown article
//! is any non-success answer to the article lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, InvalidHeaderValue, USER_AGENT,
};
use reqwest::{Client, RequestBuilder};
use tracing::debug;
use url::Url;

use super::dto::{ArticleDto, SearchResponseDto};
use crate::domain::ports::{MedicalLibrary, MedicalLibraryError};
use crate::domain::{ArticleId, LibrarySearchParams, MedicalArticle};
use crate::outbound::http_support::{HttpAdapterBuildError, join_path, status_error, transport_error};

const PORTAL_USER_AGENT: &str = "Israeli-Geriatrics-Education/1.0";
const API_KEY_HEADER: &str = "x-api-key";

/// Optional credentials presented to the library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryCredentials {
    /// Sent as `X-API-Key`.
    pub api_key: Option<String>,
    /// Sent as `Authorization: Bearer <token>`.
    pub access_token: Option<String>,
}

impl LibraryCredentials {
    fn headers(&self) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(PORTAL_USER_AGENT));
        if let Some(key) = self.api_key.as_deref().filter(|key| !key.is_empty()) {
            let mut value = HeaderValue::from_str(key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }
        if let Some(token) = self.access_token.as_deref().filter(|token| !token.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

/// Library adapter issuing `GET {base}/search` and `GET {base}/articles/{id}`.
pub struct HttpMedicalLibrary {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl HttpMedicalLibrary {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed, the
    /// base URL cannot carry a path, or a credential is not a valid header
    /// value.
    pub fn new(
        base_url: Url,
        credentials: &LibraryCredentials,
        timeout: Duration,
    ) -> Result<Self, HttpAdapterBuildError> {
        join_path(&base_url, &["search"])?;
        let headers = credentials
            .headers()
            .map_err(|_| HttpAdapterBuildError::Credentials)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder, MedicalLibraryError> {
        let url = join_path(&self.base_url, segments)
            .map_err(|error| MedicalLibraryError::transport(error.to_string()))?;
        Ok(self.client.get(url).headers(self.headers.clone()))
    }
}

fn search_query(params: &LibrarySearchParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("q", params.query.clone()),
        ("specialty", params.effective_specialty().as_str().to_owned()),
        ("lang", params.effective_language().as_str().to_owned()),
        ("limit", params.effective_limit().to_string()),
    ];
    if let Some(from) = params.date_from.as_ref().filter(|value| !value.is_empty()) {
        query.push(("from", from.clone()));
    }
    if let Some(to) = params.date_to.as_ref().filter(|value| !value.is_empty()) {
        query.push(("to", to.clone()));
    }
    query
}

#[async_trait]
impl MedicalLibrary for HttpMedicalLibrary {
    async fn search(
        &self,
        params: &LibrarySearchParams,
    ) -> Result<Vec<MedicalArticle>, MedicalLibraryError> {
        debug!(
            query = %params.query,
            limit = params.effective_limit(),
            "searching medical library"
        );
        let response = self
            .get(&["search"])?
            .query(&search_query(params))
            .send()
            .await
            .map_err(transport_error::<MedicalLibraryError>)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error::<MedicalLibraryError>)?;
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }

        let decoded: SearchResponseDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            MedicalLibraryError::decode(format!("invalid library search payload: {error}"))
        })?;
        Ok(decoded.into_domain_articles())
    }

    async fn article(&self, id: &ArticleId) -> Result<Option<MedicalArticle>, MedicalLibraryError> {
        let response = self
            .get(&["articles", id.as_str()])?
            .send()
            .await
            .map_err(transport_error::<MedicalLibraryError>)?;

        let status = response.status();
        if !status.is_success() {
            debug!(article_id = %id, status = status.as_u16(), "library article lookup missed");
            return Ok(None);
        }

        let body = response.bytes().await.map_err(transport_error::<MedicalLibraryError>)?;
        let decoded: ArticleDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            MedicalLibraryError::decode(format!("invalid library article payload: {error}"))
        })?;
        Ok(Some(decoded.into_domain()))
    }
}
