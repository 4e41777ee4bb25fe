//! Memo CRUD endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use memo_core::{Memo, MemoCategory, MemoFormData};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for listing memos.
#[derive(Debug, Deserialize)]
pub struct ListMemosQuery {
    pub category: Option<MemoCategory>,
}

/// Unwrap a memo form, answering unreadable bodies with the error envelope.
fn read_form(
    state: &AppState,
    payload: Result<Json<MemoFormData>, JsonRejection>,
) -> ApiResult<MemoFormData> {
    payload
        .map(|Json(form)| form)
        .map_err(|rejection| ApiError::invalid_input(state.locale(), rejection))
}

/// List memos, newest first, optionally in one category.
/// GET /memos
pub async fn list_memos(
    State(state): State<AppState>,
    query: Result<Query<ListMemosQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Memo>>> {
    let Query(query) =
        query.map_err(|rejection| ApiError::invalid_input(state.locale(), rejection))?;
    let memos = match query.category {
        Some(category) => state.repository().list_by_category(category).await?,
        None => state.repository().list().await?,
    };
    Ok(Json(memos))
}

/// Create a memo.
/// POST /memos
pub async fn create_memo(
    State(state): State<AppState>,
    payload: Result<Json<MemoFormData>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Memo>)> {
    let form = read_form(&state, payload)?;
    let memo = state.repository().create(&form).await?;
    Ok((StatusCode::CREATED, Json(memo)))
}

/// Delete every memo.
/// DELETE /memos
pub async fn clear_memos(State(state): State<AppState>) -> ApiResult<StatusCode> {
    state.repository().clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a memo by ID.
/// GET /memos/:id
pub async fn get_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Memo>> {
    state
        .repository()
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(state.locale().memo_not_found_message()))
}

/// Update a memo.
/// PUT /memos/:id
pub async fn update_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MemoFormData>, JsonRejection>,
) -> ApiResult<Json<Memo>> {
    let form = read_form(&state, payload)?;
    Ok(Json(state.repository().update(&id, &form).await?))
}

/// Delete a memo. Deleting an unknown id succeeds.
/// DELETE /memos/:id
pub async fn delete_memo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.repository().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
