// src/server/error.rs

//! HTTP error responses
//!
//! Failures are returned as RFC 7807 problem details:
//! `{"type": "urn:galley:error:<code>", "title", "status", "detail"}`.

use crate::error::Error;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Problem details body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable title
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Detailed description
    pub detail: String,
}

impl ApiError {
    pub fn new(code: &str, title: &str, status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            error_type: format!("urn:galley:error:{}", code),
            title: title.to_string(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    /// Bad request error
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("bad_request", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }

    /// Not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            "not_found",
            "Not Found",
            StatusCode::NOT_FOUND,
            format!("{} not found", resource),
        )
    }

    /// The trailing code of the type URI
    pub fn code(&self) -> &str {
        self.error_type
            .rsplit(':')
            .next()
            .unwrap_or(&self.error_type)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        // Every cookbook error is the caller's
        Self::new(err.code(), "Bad Request", StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [("content-type", "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
