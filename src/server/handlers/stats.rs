// src/server/handlers/stats.rs
//! Metrics handler

use crate::server::metrics::MetricsSnapshot;
use crate::server::SharedState;
use axum::{extract::State, Json};

/// Current counters plus the cookbook size
///
/// GET /metrics
pub async fn get_metrics(State(state): State<SharedState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot(state.cookbook.len()))
}
