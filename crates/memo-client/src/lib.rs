//! memo-client - Client library for the memo API.
//!
//! Provides [`MemoClient`] for the memo server and [`MemoDetailView`], the
//! state behind a memo detail dialog.
//!
//! # Example
//!
//! ```ignore
//! use memo_client::{MemoClient, MemoDetailView};
//!
//! let client = MemoClient::new("http://localhost:8080")?;
//! let memos = client.list().await?;
//!
//! let mut view = MemoDetailView::new(controller, Locale::Ko);
//! view.show(memos.into_iter().next());
//! if let Some(alert) = view.summarize(&client).await {
//!     eprintln!("{}", alert);
//! }
//! ```

mod client;
mod detail;

pub use client::{CategoryInfo, HealthStatus, MemoClient};
pub use detail::{Alert, CloseTrigger, DetailController, MemoDetailView};
pub use memo_core::types::{Memo, MemoCategory, MemoFormData};
