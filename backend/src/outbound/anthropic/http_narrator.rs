//! Reqwest-backed narrator calling the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use super::dto::{MessageDto, MessagesRequestDto, MessagesResponseDto};
use crate::domain::NarrationRequest;
use crate::domain::ports::{LiteratureNarrator, LiteratureNarratorError};
use crate::outbound::http_support::{HttpAdapterBuildError, join_path, status_error, transport_error};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1500;

/// Narrator adapter posting to `{base}/v1/messages`.
pub struct AnthropicNarrator {
    client: Client,
    endpoint: Url,
    model: String,
}

impl AnthropicNarrator {
    /// Build a narrator for `model` authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is not a valid header value, the base
    /// URL cannot carry a path, or the reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        api_key: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HttpAdapterBuildError> {
        let mut key =
            HeaderValue::from_str(api_key).map_err(|_| HttpAdapterBuildError::Credentials)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_API_VERSION));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            endpoint: join_path(base_url, &["v1", "messages"])?,
            model: model.into(),
        })
    }
}

#[async_trait]
impl LiteratureNarrator for AnthropicNarrator {
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, LiteratureNarratorError> {
        let payload = MessagesRequestDto {
            model: self.model.as_str(),
            max_tokens: MAX_TOKENS,
            system: request.system.as_str(),
            messages: [MessageDto {
                role: "user",
                content: request.user.as_str(),
            }],
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(transport_error::<LiteratureNarratorError>)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error::<LiteratureNarratorError>)?;
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }

        let decoded: MessagesResponseDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            LiteratureNarratorError::decode(format!("invalid messages payload: {error}"))
        })?;
        Ok(decoded.into_leading_text())
    }
}
