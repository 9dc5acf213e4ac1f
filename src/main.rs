mod api;
mod app_state;
mod config;
mod core;
mod domain;
mod errors;
mod logging;
mod routes;
mod scheduler;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::app_state::build_app_state;
use crate::config::AppConfig;
use crate::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = logging::initialize(&config)?;

    if config.metrics.ttl_below_interval() {
        warn!(
            ttl_secs = config.metrics.ttl.as_secs(),
            poll_secs = config.metrics.poll_interval.as_secs(),
            "Metrics TTL is shorter than the poll interval; cached pod metrics will expire between polls"
        );
    }

    let server_addr = config.server_addr;
    let state = build_app_state(config);

    // a missing or broken cluster does not keep the console from starting
    if let Err(e) = state.cluster_service.bootstrap(&state.config).await {
        error!("Cluster bootstrap failed: {:#}", e);
    }

    let app = app_router().with_state(state.clone());
    let listener = TcpListener::bind(server_addr)
        .await
        .with_context(|| format!("failed to bind {server_addr}"))?;

    info!("{} listening on {}", logging::APP_NAME, server_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    state.pod_metrics_service.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
