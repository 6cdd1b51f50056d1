// src/server/routes.rs
//! Axum router configuration for the Galley server

use crate::server::handlers::{entries, parse, stats, summary};
use crate::server::SharedState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Create the main application router
pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);
    let max_body = state.config.max_body_bytes;
    let request_log = state.config.request_log;

    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        .route("/metrics", get(stats::get_metrics))
        // Cookbook endpoints
        .route("/parse", post(parse::parse_name))
        .route("/entry", post(entries::add_entry))
        .route("/entry/:name", get(entries::get_entry))
        .route("/summary", get(summary::get_summary))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(cors)
        .with_state(state);

    if request_log {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// CORS layer; an empty origin list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
