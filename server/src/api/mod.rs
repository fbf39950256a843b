//! API Router and Application State
//!
//! Central routing configuration and shared state.

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{account, config::Config};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Pooled HTTP client shared by all Supabase clients
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Account deletion endpoint
        .merge(account::router())
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Whether a Supabase project URL is configured
    supabase_configured: bool,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        supabase_configured: !state.config.supabase_url.is_empty(),
    })
}
