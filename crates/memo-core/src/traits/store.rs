//! Memo store trait and related types.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::MemoResult;
use crate::types::{MemoFilter, MemoFormData, MemoRow};

/// Persistence backend for memo records.
///
/// Stores own identity and timestamps: `insert` assigns `id`, `created_at`
/// and `updated_at` (equal on creation), `update` refreshes `updated_at`
/// and leaves `id` and `created_at` untouched. Reads are ordered by
/// `created_at`, newest first.
#[async_trait]
pub trait MemoStore: Send + Sync {
    /// List rows accepted by the filter.
    async fn list(&self, filter: &MemoFilter) -> MemoResult<Vec<MemoRow>>;

    /// Fetch a single row. `Ok(None)` when no row has this id.
    async fn get(&self, id: &str) -> MemoResult<Option<MemoRow>>;

    /// Insert a new row and return it as stored.
    async fn insert(&self, form: &MemoFormData) -> MemoResult<MemoRow>;

    /// Overwrite the user fields of a row. Fails with `NotFound` when no row matched.
    async fn update(&self, id: &str, form: &MemoFormData) -> MemoResult<MemoRow>;

    /// Delete one row, returning the number of rows removed.
    async fn delete(&self, id: &str) -> MemoResult<u64>;

    /// Delete every row, returning the number of rows removed.
    async fn delete_all(&self) -> MemoResult<u64>;

    /// Count all rows.
    async fn count(&self) -> MemoResult<u64> {
        Ok(self.list(&MemoFilter::all()).await?.len() as u64)
    }

    /// Short provider name for logs and health output.
    fn provider_name(&self) -> &'static str;
}

/// Store backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Embedded SQLite file.
    #[default]
    Sqlite,
    /// Supabase (PostgREST) project.
    Supabase,
}

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend type.
    pub provider: StoreProvider,
    /// Database file for the SQLite backend (`:memory:` for an in-memory database).
    pub path: PathBuf,
    /// Project URL for remote backends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// API key for remote backends.
    #[serde(skip_serializing)]
    pub api_key: Option<SecretString>,
    /// Table name.
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let memo_dir = dirs::home_dir()
            .map(|h| h.join(".memo"))
            .unwrap_or_else(|| PathBuf::from(".memo"));

        Self {
            provider: StoreProvider::Sqlite,
            path: memo_dir.join("memos.db"),
            url: None,
            api_key: None,
            table: "memos".to_string(),
        }
    }
}

impl StoreConfig {
    /// SQLite store at the given path.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            provider: StoreProvider::Sqlite,
            path: path.into(),
            ..Default::default()
        }
    }

    /// In-memory SQLite store.
    pub fn in_memory() -> Self {
        Self::sqlite(":memory:")
    }

    /// Supabase store for the given project.
    pub fn supabase(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            provider: StoreProvider::Supabase,
            url: Some(url.into()),
            api_key: Some(SecretString::new(api_key.into())),
            ..Default::default()
        }
    }
}
