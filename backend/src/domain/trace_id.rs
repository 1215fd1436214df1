//! Request-scoped trace identifier for correlation across logs and errors.
//!
//! `TraceId` follows a request through the portal: the trace middleware opens
//! a scope per request, domain errors capture it, and outbound adapters log it
//! next to upstream failures. The dashboard may send its own identifier in
//! the `trace-id` header; [`TraceId::from_inbound`] decides whether to keep it.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`TraceId::scope`] when spawning new tasks so the active identifier
//! propagates.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the request trace identifier in both directions.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use geriatrics_portal::TraceId;
///
/// async fn handler() -> Option<String> {
///     TraceId::current().map(|id| id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier for a request carrying `header` as its `trace-id` value.
    ///
    /// A well-formed, non-nil UUID is kept so client and server logs line up.
    /// Anything else is replaced with a generated identifier.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::TraceId;
    ///
    /// let kept = TraceId::from_inbound(Some("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
    /// assert_eq!(kept.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    ///
    /// let replaced = TraceId::from_inbound(Some("dashboard-42"));
    /// assert_ne!(replaced.to_string(), "dashboard-42");
    /// ```
    #[must_use]
    pub fn from_inbound(header: Option<&str>) -> Self {
        header
            .and_then(|raw| raw.trim().parse::<Self>().ok())
            .filter(|id| !id.0.is_nil())
            .unwrap_or_else(Self::generate)
    }

    /// Returns the current trace identifier if one is in scope.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Execute the provided future with the supplied trace identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use geriatrics_portal::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id = TraceId::generate();
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DASHBOARD_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case::plain(DASHBOARD_ID)]
    #[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
    fn inbound_uuid_is_kept(#[case] header: &str) {
        assert_eq!(TraceId::from_inbound(Some(header)).to_string(), DASHBOARD_ID);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::garbage(Some("dashboard-42"))]
    #[case::empty(Some(""))]
    #[case::nil(Some("00000000-0000-0000-0000-000000000000"))]
    fn unusable_inbound_values_are_replaced(#[case] header: Option<&str>) {
        let id = TraceId::from_inbound(header);
        assert!(!id.as_uuid().is_nil());
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn errors_raised_in_scope_see_the_request_id() {
        let expected = TraceId::from_inbound(Some(DASHBOARD_ID));
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn current_is_none_out_of_scope() {
        assert!(TraceId::current().is_none());
    }
}
