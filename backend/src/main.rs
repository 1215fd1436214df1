//! Portal entry-point: loads settings, wires adapters and serves HTTP.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use geriatrics_portal::inbound::http::health::HealthState;
use geriatrics_portal::settings::PortalSettings;

use server::{ServerConfig, build_http_state, create_server, shutdown_on_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortalSettings::load().map_err(std::io::Error::other)?;
    let bind_addr = settings.server.bind_addr().map_err(std::io::Error::other)?;
    let http_state = build_http_state(&settings).map_err(std::io::Error::other)?;

    let config = ServerConfig::new(bind_addr);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus()?));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, config)?;
    actix_web::rt::spawn(shutdown_on_signal(server.handle(), health_state));
    info!(%bind_addr, "geriatrics portal listening");
    server.await
}
