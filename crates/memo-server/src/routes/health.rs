//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
    /// Number of stored memos; absent when the store could not be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memos: Option<u64>,
    pub summarization: bool,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let memos = state.repository().count().await.ok();

    Json(HealthResponse {
        status: if memos.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store: state.repository().provider_name(),
        memos,
        summarization: state.gateway().is_configured(),
    })
}
