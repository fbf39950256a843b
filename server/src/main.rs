//! Purge Server - Main Entry Point
//!
//! Serves the account deletion endpoint.

use anyhow::Result;
use tracing::{error, info};

use purge_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the filter is read so RUST_LOG can live there too
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "purge_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Purge Server"
    );

    if config.supabase_url.is_empty() {
        tracing::warn!("SUPABASE_URL is not set; every deletion request will fail");
    }

    let bind_address = config.bind_address;

    // Build application state
    let state = api::AppState::new(config)?;

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!(address = %bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
