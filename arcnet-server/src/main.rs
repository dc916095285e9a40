//! ARCNET Server - REST API for solar active region classification
//!
//! Exposes arcnet-core functionality via HTTP endpoints:
//! - GET/POST /arcnet/classify_cutout/ - Classify an AR cutout
//! - GET/POST /arcnet/full_disk_detection - Detect all ARs on the disk

use std::net::SocketAddr;

use arcnet_core::ArchiveFactory;
use arcnet_server::{create_router_with_config, AppState, Config};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("arcnet_server=info,arcnet_core=info,tower_http=info")
        }))
        .with_target(true)
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server terminated");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let archive = ArchiveFactory::create(config.archive_config())?;
    tracing::info!(archive = %archive.source_id(), "SRS archive ready");

    let app = create_router_with_config(&config, AppState::new(archive));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("ARCNET API listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
