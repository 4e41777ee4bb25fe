//! Summarization endpoint.
//!
//! Uses its own flat bodies, `{summary}` on success and `{error}` on failure,
//! rather than the CRUD error envelope.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeErrorResponse {
    pub error: &'static str,
}

/// Summarize memo content.
/// POST /api/summarize
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    // An unreadable body carries no content.
    let content = match payload {
        Ok(Json(request)) => request.content,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable summarize body");
            None
        }
    };

    match state.gateway().summarize(content.as_deref()).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err(err) => {
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(SummarizeErrorResponse {
                    error: err.wire_message(),
                }),
            )
                .into_response()
        }
    }
}
