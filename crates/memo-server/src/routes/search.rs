//! Search endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use memo_core::Memo;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for searching memos.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Search memos by title, content or tag.
/// POST /search
pub async fn search_memos(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<Memo>>> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::invalid_input(state.locale(), rejection))?;
    Ok(Json(state.repository().search(&request.query).await?))
}
