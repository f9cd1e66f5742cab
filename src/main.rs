//! salgado-api server entry point.
//!
//! Loads configuration, connects the repository and serves the REST API.

use std::time::Duration;

use anyhow::Context;
use tokio::signal;

use salgado_api::api;
use salgado_api::app_state::AppState;
use salgado_api::config::ServiceConfig;
use salgado_api::persistence;
use salgado_api::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    telemetry::init(config.log_format);
    tracing::info!(
        addr = %config.listen_addr,
        driver = %config.database.driver,
        "starting salgado-api"
    );

    // Build persistence layer
    let repository = persistence::connect(&config.database)
        .await
        .with_context(|| format!("cannot open {} database", config.database.driver))?;

    // Build router
    let request_timeout =
        (config.request_timeout_secs > 0).then(|| Duration::from_secs(config.request_timeout_secs));
    let app = api::build_app(AppState::new(repository), request_timeout);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
