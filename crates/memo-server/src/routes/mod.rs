//! Route definitions for the REST API.

mod categories;
mod health;
mod memos;
mod search;
mod summarize;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/categories", get(categories::list_categories))
        // Memo operations
        .route(
            "/memos",
            get(memos::list_memos)
                .post(memos::create_memo)
                .delete(memos::clear_memos),
        )
        .route(
            "/memos/:id",
            get(memos::get_memo)
                .put(memos::update_memo)
                .delete(memos::delete_memo),
        )
        // Search
        .route("/search", post(search::search_memos))
        // Summarization
        .route("/api/summarize", post(summarize::summarize))
        // Attach state
        .with_state(state)
}

pub use categories::*;
pub use health::*;
pub use memos::*;
pub use search::*;
pub use summarize::*;
