//! Liveness and readiness endpoints
//!
//! GET /        - liveness text kept from the original service
//! GET /health  - liveness probe (server is up)
//! GET /ready   - readiness probe (classifier loaded, reports provenance)

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use heartwise_kernel::FEATURE_NAMES;
use serde_json::json;

use crate::state::AppState;

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "API running" }))
}

/// GET /health - liveness probe
///
/// Always returns 200 OK while the process is alive.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// GET /ready - readiness probe
///
/// The classifier is loaded before the listener binds, so a running server
/// is always ready; the body describes what it is serving.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "model": &*state.model,
            "confidence_policy": state.service.policy(),
            "features": FEATURE_NAMES,
        })),
    )
}
