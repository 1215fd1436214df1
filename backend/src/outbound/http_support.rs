//! Transport helpers shared by the reqwest-backed adapters.
//!
//! Adapters keep their own decode errors; transport and status failures are
//! mapped here onto any port error implementing [`UpstreamError`].

use reqwest::StatusCode;
use url::Url;

use crate::domain::ports::UpstreamError;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Errors raised while constructing an HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpAdapterBuildError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// A configured credential is not a valid header value.
    #[error("credential is not a valid HTTP header value")]
    Credentials,
    /// The configured base URL cannot carry a path.
    #[error("base URL cannot be used as an endpoint prefix: {url}")]
    BaseUrl {
        /// Rejected URL.
        url: String,
    },
}

/// Append path segments to `base`, keeping any path it already has.
///
/// Segments are percent-encoded, so identifiers containing `/` stay in one
/// segment.
pub(crate) fn join_path(base: &Url, segments: &[&str]) -> Result<Url, HttpAdapterBuildError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HttpAdapterBuildError::BaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Map a reqwest failure onto a port error, keeping timeouts distinct.
pub(crate) fn transport_error<E: UpstreamError>(error: reqwest::Error) -> E {
    if error.is_timeout() {
        E::timeout_failure(error.to_string())
    } else {
        E::transport_failure(error.to_string())
    }
}

/// Port error for a non-success response, carrying a body preview.
pub(crate) fn status_error<E: UpstreamError>(status: StatusCode, body: &[u8]) -> E {
    E::status_failure(status.as_u16(), status_message(status, body))
}

/// `status N` or `status N: <preview>` for error messages.
pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

/// Whitespace-collapsed, length-capped view of a response body.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::ports::MedicalLibraryError;
    use httpmock::prelude::*;
    use reqwest::Client;
    use rstest::rstest;

    async fn fetch_error(url: &str, timeout: Duration) -> MedicalLibraryError {
        let client = Client::builder().timeout(timeout).build().expect("client builds");
        let error = client.get(url).send().await.expect_err("request fails");
        transport_error(error)
    }

    #[rstest]
    #[case::no_path("http://localhost:8888", &["api", "analyze"], "http://localhost:8888/api/analyze")]
    #[case::keeps_prefix("https://library.szmc.org.il/api", &["search"], "https://library.szmc.org.il/api/search")]
    #[case::trailing_slash("https://library.szmc.org.il/api/", &["articles", "42"], "https://library.szmc.org.il/api/articles/42")]
    #[case::encodes_ids("http://lib/api", &["articles", "a/b c"], "http://lib/api/articles/a%2Fb%20c")]
    fn joins_segments_onto_base(#[case] base: &str, #[case] segments: &[&str], #[case] expected: &str) {
        let base = Url::parse(base).expect("valid base");
        assert_eq!(join_path(&base, segments).expect("joinable").as_str(), expected);
    }

    #[rstest]
    fn rejects_opaque_base() {
        let base = Url::parse("mailto:ops@example.org").expect("valid url");
        assert!(matches!(
            join_path(&base, &["search"]),
            Err(HttpAdapterBuildError::BaseUrl { .. })
        ));
    }

    #[rstest]
    fn preview_collapses_whitespace_and_truncates() {
        let body = format!("{{\n  \"error\":   \"{}\" }}", "x".repeat(300));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("{ \"error\": \"xxx"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
    }

    #[rstest]
    fn status_message_omits_empty_preview() {
        assert_eq!(status_message(StatusCode::BAD_GATEWAY, b"  "), "status 502");
        assert_eq!(
            status_message(StatusCode::NOT_FOUND, b"no such route"),
            "status 404: no such route"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn slow_upstream_maps_to_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).delay(Duration::from_millis(500));
            })
            .await;

        let err = fetch_error(&server.url("/search"), Duration::from_millis(50)).await;
        assert!(matches!(err, MedicalLibraryError::Timeout { .. }), "{err:?}");
    }

    #[rstest]
    #[tokio::test]
    async fn refused_connection_maps_to_transport() {
        let err = fetch_error("http://127.0.0.1:9/search", Duration::from_secs(2)).await;
        assert!(matches!(err, MedicalLibraryError::Transport { .. }), "{err:?}");
    }

    #[rstest]
    fn status_error_carries_code_and_preview() {
        let err: MedicalLibraryError = status_error(StatusCode::SERVICE_UNAVAILABLE, b"index rebuild");
        assert_eq!(
            err,
            MedicalLibraryError::status(503_u16, "status 503: index rebuild")
        );
    }
}
