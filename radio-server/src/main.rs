use std::sync::Arc;

use radio_server::config::ServerConfig;
use radio_server::service::RadioService;
use radio_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let radio = match RadioService::open(config.service) {
        Ok(radio) => Arc::new(radio),
        Err(e) => {
            error!("failed to create directory client: {e}");
            std::process::exit(1);
        }
    };

    let app = create_router(AppState::new(radio.clone()));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };
    info!("Global Radio API listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET  /api/countries              - Countries with stations");
    info!("  GET  /api/stations/{{code}}        - Stations for a country");
    info!("  GET  /api/stations/{{id}}/validate - Stream check (stub)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("server error: {e}");
    }

    info!("Global Radio API shutting down...");
    match Arc::try_unwrap(radio) {
        Ok(radio) => radio.close(),
        Err(_) => warn!("radio service still shared at shutdown, dropping without close"),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
