//! Graceful shutdown driven by process signals.
//!
//! Built-in actix signal handling is disabled in [`super::create_server`] so
//! liveness can fail before the workers drain.

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{error, info};

use geriatrics_portal::inbound::http::health::HealthState;

/// Wait for SIGINT or SIGTERM, then drain the server.
pub async fn shutdown_on_signal(handle: ServerHandle, health_state: web::Data<HealthState>) {
    if let Err(err) = shutdown_signal().await {
        error!(error = %err, "failed to listen for shutdown signals");
        return;
    }
    info!("shutdown signal received");
    drain(handle, health_state).await;
}

/// Fail the liveness probe, then stop accepting connections and let
/// in-flight requests finish.
pub async fn drain(handle: ServerHandle, health_state: web::Data<HealthState>) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
