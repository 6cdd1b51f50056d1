// src/server/handlers/entries.rs
//! Entry registration and lookup handlers

use crate::cookbook::{Entry, EntryDraft};
use crate::server::error::{ApiError, ApiResult};
use crate::server::SharedState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Register a new ingredient or recipe
///
/// POST /entry
pub async fn add_entry(
    State(state): State<SharedState>,
    payload: Result<Json<EntryDraft>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(draft) = payload.map_err(|rejection| {
        state.metrics.record_entry_reject();
        ApiError::from(rejection)
    })?;
    let name = draft.name.clone();

    match state.cookbook.admit(draft) {
        Ok(kind) => {
            info!("Admitted {} '{}'", kind, name);
            state.metrics.record_admit();
            Ok(Json(json!({})))
        }
        Err(e) => {
            warn!("Rejected entry '{}': {}", name, e);
            state.metrics.record_entry_reject();
            Err(e.into())
        }
    }
}

/// Fetch a stored entry by exact name
///
/// GET /entry/:name
pub async fn get_entry(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Entry>> {
    state.metrics.record_request();
    state
        .cookbook
        .lookup(&name)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&format!("Entry '{}'", name)))
}
