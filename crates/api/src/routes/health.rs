use axum::extract::State;
use axum::{routing::get, Json, Router};
use beacon_core::types::NotificationId;
use serde::Serialize;

use crate::response::OkResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Notifications currently buffered.
    pub buffered: usize,
    /// Ring capacity.
    pub capacity: usize,
    /// Most recently assigned id.
    pub last_id: NotificationId,
}

/// GET /health -- returns service status and store stats.
async fn health_check(State(state): State<AppState>) -> Json<OkResponse<HealthResponse>> {
    Json(OkResponse::new(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        buffered: state.store.len(),
        capacity: state.store.capacity(),
        last_id: state.store.last_id(),
    }))
}

/// Mount health check routes (root level, not under `/notify`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
