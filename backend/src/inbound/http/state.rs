//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ClinicalAnalysisCommand, FixtureClinicalAnalysisCommand, FixtureLiteratureQuery,
    LiteratureQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub analysis: Arc<dyn ClinicalAnalysisCommand>,
    pub literature: Arc<dyn LiteratureQuery>,
}

impl HttpState {
    /// Construct state from the two driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use geriatrics_portal::domain::ports::{
    ///     FixtureClinicalAnalysisCommand, FixtureLiteratureQuery,
    /// };
    /// use geriatrics_portal::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureClinicalAnalysisCommand),
    ///     Arc::new(FixtureLiteratureQuery),
    /// );
    /// let _literature = state.literature.clone();
    /// ```
    pub fn new(
        analysis: Arc<dyn ClinicalAnalysisCommand>,
        literature: Arc<dyn LiteratureQuery>,
    ) -> Self {
        Self {
            analysis,
            literature,
        }
    }
}

impl Default for HttpState {
    /// State backed by fixture ports, for tests and documentation builds.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureClinicalAnalysisCommand),
            Arc::new(FixtureLiteratureQuery),
        )
    }
}
