//! Runtime configuration loaded via OrthoConfig.
//!
//! One settings struct per collaborator, each with its own environment
//! prefix. Endpoints and limits carry OrthoConfig defaults; credentials stay
//! optional.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::anthropic::DEFAULT_MODEL;
use crate::outbound::library::LibraryCredentials;

const DEFAULT_ANALYZER_URL: &str = "http://localhost:8888";
const DEFAULT_LIBRARY_BASE_URL: &str = "https://library.szmc.org.il/api";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Program name handed to OrthoConfig when no CLI arguments are parsed.
pub const PROGRAM_NAME: &str = "geriatrics-portal";

fn default_analyzer_url() -> String {
    String::from(DEFAULT_ANALYZER_URL)
}

fn default_library_base_url() -> String {
    String::from(DEFAULT_LIBRARY_BASE_URL)
}

fn default_anthropic_base_url() -> String {
    String::from(DEFAULT_ANTHROPIC_BASE_URL)
}

fn default_model() -> String {
    String::from(DEFAULT_MODEL)
}

fn default_bind_addr() -> String {
    String::from(DEFAULT_BIND_ADDR)
}

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(String),
    #[error("{variable} is not a valid URL: {source}")]
    Url {
        variable: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{variable} is not a valid socket address: {source}")]
    BindAddr {
        variable: &'static str,
        #[source]
        source: std::net::AddrParseError,
    },
}

fn parse_url(variable: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw.trim()).map_err(|source| SettingsError::Url { variable, source })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Connection to the clinical analyzer (`ANALYZER_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ANALYZER")]
pub struct AnalyzerSettings {
    /// Analyzer base URL.
    #[ortho_config(default = default_analyzer_url())]
    pub url: String,
}

impl AnalyzerSettings {
    pub fn url(&self) -> Result<Url, SettingsError> {
        parse_url("ANALYZER_URL", &self.url)
    }
}

/// SZMC e-library access (`SZMC_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SZMC")]
pub struct LibrarySettings {
    /// Library API base URL.
    #[ortho_config(default = default_library_base_url())]
    pub library_base_url: String,
    /// Sent as `X-API-Key`.
    pub library_api_key: Option<String>,
    /// Institution identifier issued by the library. Not sent upstream.
    pub institution_id: Option<String>,
    /// Sent as a bearer token.
    pub access_token: Option<String>,
}

impl LibrarySettings {
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        parse_url("SZMC_LIBRARY_BASE_URL", &self.library_base_url)
    }

    pub fn credentials(&self) -> LibraryCredentials {
        LibraryCredentials {
            api_key: non_blank(self.library_api_key.as_deref()).map(str::to_owned),
            access_token: non_blank(self.access_token.as_deref()).map(str::to_owned),
        }
    }
}

/// LLM narrator (`ANTHROPIC_*`). Narration is disabled without an API key.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ANTHROPIC")]
pub struct AnthropicSettings {
    pub api_key: Option<String>,
    #[ortho_config(default = default_anthropic_base_url())]
    pub base_url: String,
    #[ortho_config(default = default_model())]
    pub model: String,
}

impl AnthropicSettings {
    /// API key, or `None` when unset or blank.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn base_url(&self) -> Result<Url, SettingsError> {
        parse_url("ANTHROPIC_BASE_URL", &self.base_url)
    }

    /// Configured model; a blank value falls back to the default.
    pub fn model(&self) -> &str {
        non_blank(Some(self.model.as_str())).unwrap_or(DEFAULT_MODEL)
    }
}

/// Listener and shared outbound settings (`PORTAL_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct ServerSettings {
    #[ortho_config(default = default_bind_addr())]
    pub bind_addr: String,
    /// Request timeout in seconds applied to every outbound client.
    #[ortho_config(default = 30)]
    pub outbound_timeout_secs: u64,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|source| SettingsError::BindAddr {
                variable: "PORTAL_BIND_ADDR",
                source,
            })
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_secs(self.outbound_timeout_secs)
    }
}

/// All portal settings.
#[derive(Debug, Clone)]
pub struct PortalSettings {
    pub analyzer: AnalyzerSettings,
    pub library: LibrarySettings,
    pub anthropic: AnthropicSettings,
    pub server: ServerSettings,
}

impl PortalSettings {
    /// Load every section from the environment and configuration files.
    pub fn load() -> Result<Self, SettingsError> {
        let args = || [OsString::from(PROGRAM_NAME)];
        let load_error = |err: &dyn std::fmt::Display| SettingsError::Load(err.to_string());
        Ok(Self {
            analyzer: AnalyzerSettings::load_from_iter(args()).map_err(|e| load_error(&e))?,
            library: LibrarySettings::load_from_iter(args()).map_err(|e| load_error(&e))?,
            anthropic: AnthropicSettings::load_from_iter(args()).map_err(|e| load_error(&e))?,
            server: ServerSettings::load_from_iter(args()).map_err(|e| load_error(&e))?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const ALL_VARIABLES: [&str; 10] = [
        "ANALYZER_URL",
        "SZMC_LIBRARY_BASE_URL",
        "SZMC_LIBRARY_API_KEY",
        "SZMC_INSTITUTION_ID",
        "SZMC_ACCESS_TOKEN",
        "ANTHROPIC_API_KEY",
        "ANTHROPIC_BASE_URL",
        "ANTHROPIC_MODEL",
        "PORTAL_BIND_ADDR",
        "PORTAL_OUTBOUND_TIMEOUT_SECS",
    ];

    fn env_with(overrides: &[(&str, &str)]) -> [(&'static str, Option<String>); 10] {
        ALL_VARIABLES.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        })
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(env_with(&[]));

        let settings = PortalSettings::load().expect("settings should load");
        assert_eq!(
            settings.analyzer.url().expect("analyzer url").as_str(),
            "http://localhost:8888/"
        );
        assert_eq!(
            settings.library.base_url().expect("library url").as_str(),
            "https://library.szmc.org.il/api"
        );
        assert_eq!(settings.library.credentials(), LibraryCredentials::default());
        assert!(settings.anthropic.api_key().is_none());
        assert_eq!(settings.anthropic.model(), DEFAULT_MODEL);
        assert_eq!(
            settings.server.bind_addr().expect("bind addr"),
            "0.0.0.0:3000".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(settings.server.outbound_timeout(), Duration::from_secs(30));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("ANALYZER_URL", "http://analyzer:9000"),
            ("SZMC_LIBRARY_API_KEY", "lib-key"),
            ("SZMC_ACCESS_TOKEN", "token"),
            ("SZMC_INSTITUTION_ID", "szmc-geri"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ANTHROPIC_MODEL", "claude-test"),
            ("PORTAL_BIND_ADDR", "127.0.0.1:8080"),
            ("PORTAL_OUTBOUND_TIMEOUT_SECS", "5"),
        ]));

        let settings = PortalSettings::load().expect("settings should load");
        assert_eq!(
            settings.analyzer.url().expect("analyzer url").as_str(),
            "http://analyzer:9000/"
        );
        let credentials = settings.library.credentials();
        assert_eq!(credentials.api_key.as_deref(), Some("lib-key"));
        assert_eq!(credentials.access_token.as_deref(), Some("token"));
        assert_eq!(settings.library.institution_id.as_deref(), Some("szmc-geri"));
        assert_eq!(settings.anthropic.api_key(), Some("sk-test"));
        assert_eq!(settings.anthropic.model(), "claude-test");
        assert_eq!(settings.server.outbound_timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.server.bind_addr().expect("bind addr").port(),
            8080
        );
    }

    #[rstest]
    fn narrator_section_loads_without_any_variables() {
        let _guard = lock_env(env_with(&[]));

        let settings = AnthropicSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
            .expect("narrator settings should load from defaults");
        assert!(settings.api_key().is_none());
        assert_eq!(
            settings.base_url().expect("anthropic url").as_str(),
            "https://api.anthropic.com/"
        );
        assert_eq!(settings.model(), DEFAULT_MODEL);
    }

    #[rstest]
    fn blank_model_falls_back_to_default() {
        let _guard = lock_env(env_with(&[("ANTHROPIC_MODEL", " ")]));

        let settings = AnthropicSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
            .expect("settings should load");
        assert_eq!(settings.model(), DEFAULT_MODEL);
    }

    #[rstest]
    fn blank_anthropic_key_disables_narration() {
        let _guard = lock_env(env_with(&[("ANTHROPIC_API_KEY", "  ")]));

        let settings = AnthropicSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
            .expect("settings should load");
        assert!(settings.api_key().is_none());
    }

    #[rstest]
    fn invalid_urls_name_the_variable() {
        let settings = AnalyzerSettings {
            url: "not a url".to_owned(),
        };
        let err = settings.url().expect_err("invalid url");
        assert!(err.to_string().starts_with("ANALYZER_URL is not a valid URL"));
    }
}
