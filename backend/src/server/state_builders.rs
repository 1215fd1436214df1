//! Wiring of outbound adapters into the domain services behind [`HttpState`].

use std::sync::Arc;

use tracing::info;

use geriatrics_portal::domain::{ClinicalAnalysisService, LiteratureService};
use geriatrics_portal::inbound::http::state::HttpState;
use geriatrics_portal::outbound::HttpAdapterBuildError;
use geriatrics_portal::outbound::analyzer::HttpClinicalAnalyzer;
use geriatrics_portal::outbound::anthropic::AnthropicNarrator;
use geriatrics_portal::outbound::library::HttpMedicalLibrary;
use geriatrics_portal::settings::{PortalSettings, SettingsError};

/// Failures while building the handler state.
#[derive(Debug, thiserror::Error)]
pub enum StateBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to build {adapter} client: {source}")]
    Adapter {
        adapter: &'static str,
        #[source]
        source: HttpAdapterBuildError,
    },
}

fn adapter(name: &'static str) -> impl FnOnce(HttpAdapterBuildError) -> StateBuildError {
    move |source| StateBuildError::Adapter {
        adapter: name,
        source,
    }
}

fn build_narrator(settings: &PortalSettings) -> Result<Option<Arc<AnthropicNarrator>>, StateBuildError> {
    let Some(api_key) = settings.anthropic.api_key() else {
        info!("ANTHROPIC_API_KEY not set; literature narration disabled");
        return Ok(None);
    };
    let narrator = AnthropicNarrator::new(
        &settings.anthropic.base_url()?,
        api_key,
        settings.anthropic.model(),
        settings.server.outbound_timeout(),
    )
    .map_err(adapter("anthropic"))?;
    Ok(Some(Arc::new(narrator)))
}

/// Build the production [`HttpState`] from loaded settings.
pub fn build_http_state(settings: &PortalSettings) -> Result<HttpState, StateBuildError> {
    let timeout = settings.server.outbound_timeout();

    let analyzer = HttpClinicalAnalyzer::new(&settings.analyzer.url()?, timeout)
        .map_err(adapter("analyzer"))?;
    let library = HttpMedicalLibrary::new(
        settings.library.base_url()?,
        &settings.library.credentials(),
        timeout,
    )
    .map_err(adapter("library"))?;
    let narrator = build_narrator(settings)?;

    Ok(HttpState::new(
        Arc::new(ClinicalAnalysisService::new(Arc::new(analyzer))),
        Arc::new(LiteratureService::new(Arc::new(library), narrator)),
    ))
}
