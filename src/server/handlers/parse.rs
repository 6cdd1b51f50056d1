// src/server/handlers/parse.rs
//! Name normalization handler

use crate::cookbook::normalize_name;
use crate::server::error::ApiResult;
use crate::server::SharedState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Request body for name parsing
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseRequest {
    /// Free-form name to normalize
    pub input: String,
}

/// Response for a successful parse
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    /// The normalized name
    pub msg: String,
}

/// Normalize a handwritten name
///
/// POST /parse
pub async fn parse_name(
    State(state): State<SharedState>,
    payload: Result<Json<ParseRequest>, JsonRejection>,
) -> ApiResult<Json<ParseResponse>> {
    let parsed: ApiResult<String> = payload
        .map_err(Into::into)
        .and_then(|Json(request)| normalize_name(&request.input).map_err(Into::into));

    match parsed {
        Ok(msg) => {
            state.metrics.record_parse();
            Ok(Json(ParseResponse { msg }))
        }
        Err(e) => {
            debug!("Parse rejected: {}", e.detail);
            state.metrics.record_parse_reject();
            Err(e)
        }
    }
}
