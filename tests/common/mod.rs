// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use galley::server::{create_router, ServerConfig, ServerState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Build a router over a fresh, empty cookbook.
///
/// Returns the shared state too so tests can inspect the cookbook directly.
pub fn test_app() -> (Router, Arc<ServerState>) {
    let config = ServerConfig {
        request_log: false,
        ..ServerConfig::default()
    };
    let state = Arc::new(ServerState::new(config));
    (create_router(state.clone()), state)
}

/// Send a request and return the status with the body parsed as JSON
/// (or `Value::Null` for an empty or non-JSON body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Register an entry and assert it was accepted.
pub async fn admit(app: &Router, entry: Value) {
    let (status, body) = post_json(app, "/entry", entry.clone()).await;
    assert_eq!(status, StatusCode::OK, "entry {} rejected: {}", entry, body);
}

/// The error code at the end of a problem-details `type` URI.
pub fn error_code(body: &Value) -> &str {
    body["type"]
        .as_str()
        .and_then(|t| t.rsplit(':').next())
        .unwrap_or_default()
}
