//! memo-core - Core library for memo.
//!
//! This crate provides the memo data model, the store and LLM traits, the
//! [`MemoRepository`] and the [`SummarizationGateway`].
//!
//! # Example
//!
//! ```ignore
//! use memo_core::{Locale, MemoCategory, MemoFormData, MemoRepository};
//!
//! let repo = MemoRepository::new(store, Locale::En);
//!
//! let memo = repo
//!     .create(&MemoFormData::new("Trip Plan", "Visit museum", MemoCategory::Personal).with_tags(["travel"]))
//!     .await?;
//!
//! let hits = repo.search("travel").await?;
//! ```

pub mod config;
pub mod error;
pub mod locale;
pub mod repository;
pub mod summarize;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ErrorCode, MemoError, MemoResult, Operation};
pub use locale::Locale;
pub use repository::MemoRepository;
pub use summarize::{SummarizationGateway, SummarizeError};
pub use traits::{
    GenerationOptions, Llm, LlmConfig, LlmProvider, LlmProviderConfig, LlmResponse, MemoStore,
    StoreConfig, StoreProvider, TokenUsage,
};
pub use types::{Memo, MemoCategory, MemoFilter, MemoFormData, MemoRow, Message, MessageRole};
