// src/server/mod.rs
//! Galley HTTP server
//!
//! Serves the cookbook over HTTP:
//! - `POST /parse` normalizes a handwritten name
//! - `POST /entry` registers an ingredient or recipe
//! - `GET /entry/:name` returns a stored entry
//! - `GET /summary?name=` resolves a recipe into base ingredients
//! - `GET /health` and `GET /metrics` for operators
//!
//! The cookbook lives in [`ServerState`], built once at startup and shared
//! with every handler through axum's `State` extractor.

mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
mod routes;

pub use config::{parse_size, GalleyConfig};
pub use error::{ApiError, ApiResult};
pub use metrics::{MetricsSnapshot, ServerMetrics};
pub use routes::create_router;

use crate::cookbook::Cookbook;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Default request body limit (64 KiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Log every request and response
    pub request_log: bool,
    /// CORS allowed origins (empty = any origin)
    pub cors_allowed_origins: Vec<String>,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_log: true,
            cors_allowed_origins: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
    /// The process-wide cookbook, empty at startup
    pub cookbook: Cookbook,
    /// Metrics collector
    pub metrics: ServerMetrics,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            cookbook: Cookbook::new(),
            metrics: ServerMetrics::new(),
        }
    }
}

/// Shared server state type
pub type SharedState = Arc<ServerState>;

/// Start the Galley server and run until Ctrl-C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    info!("Starting Galley server on {}", config.bind_addr);
    info!("Max request body: {} bytes", config.max_body_bytes);
    if config.cors_allowed_origins.is_empty() {
        info!("CORS: any origin");
    } else {
        info!("CORS: {}", config.cors_allowed_origins.join(", "));
    }

    let state = Arc::new(ServerState::new(config.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Running on: http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Galley stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
