//! RPS Server
//!
//! Runs the engine behind an HTTP API with in-memory demo wallets.

use rps_core::MockTransfer;
use rps_server::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        "Owner {} (fee {}, resolution window {}s)",
        config.engine.owner,
        config.engine.fee,
        config.engine.resolution_window
    );
    if !config.engine.start_running {
        tracing::info!("Starting paused: new games are rejected until resumed");
    }

    let state = AppState::with_mock_wallets(&config, MockTransfer::new());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("RPS service starting on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}
