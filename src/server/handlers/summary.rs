// src/server/handlers/summary.rs
//! Recipe summary handler

use crate::cookbook::Summary;
use crate::server::error::{ApiError, ApiResult};
use crate::server::SharedState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

/// Query string for summary requests
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Name of the recipe to resolve
    pub name: String,
}

/// Resolve a recipe into its base ingredients and total cook time
///
/// GET /summary?name=<recipe>
pub async fn get_summary(
    State(state): State<SharedState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> ApiResult<Json<Summary>> {
    let Query(query) = query.map_err(|rejection| {
        state.metrics.record_summary_reject();
        ApiError::from(rejection)
    })?;

    match state.cookbook.summarize(&query.name) {
        Ok(summary) => {
            info!(
                "Summary for '{}': {} ingredients, cook time {}",
                summary.name,
                summary.ingredients.len(),
                summary.cook_time
            );
            state.metrics.record_summary();
            Ok(Json(summary))
        }
        Err(e) => {
            warn!("Summary for '{}' rejected: {}", query.name, e);
            state.metrics.record_summary_reject();
            Err(e.into())
        }
    }
}
