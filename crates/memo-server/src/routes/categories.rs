//! Category listing endpoint.

use axum::{extract::State, Json};
use memo_core::MemoCategory;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryItem {
    pub value: MemoCategory,
    pub label: &'static str,
}

/// List categories with their localized labels.
/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryItem>> {
    let locale = state.locale();
    Json(
        MemoCategory::all()
            .into_iter()
            .map(|value| CategoryItem {
                value,
                label: locale.category_label(value),
            })
            .collect(),
    )
}
