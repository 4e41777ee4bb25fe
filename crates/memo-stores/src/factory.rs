//! Factory for creating memo stores.

use std::sync::Arc;

use memo_core::error::{MemoError, MemoResult};
use memo_core::traits::{MemoStore, StoreConfig, StoreProvider};

/// Factory for creating memo store providers.
pub struct MemoStoreFactory;

impl MemoStoreFactory {
    /// Create a memo store from the given configuration.
    pub fn create(config: &StoreConfig) -> MemoResult<Arc<dyn MemoStore>> {
        match config.provider {
            #[cfg(feature = "sqlite")]
            StoreProvider::Sqlite => {
                let store = crate::sqlite::SqliteMemoStore::from_config(config)?;
                Ok(Arc::new(store))
            }

            #[cfg(feature = "supabase")]
            StoreProvider::Supabase => {
                let store = crate::supabase::SupabaseMemoStore::new(config)?;
                Ok(Arc::new(store))
            }

            #[allow(unreachable_patterns)]
            other => Err(MemoError::UnsupportedProvider {
                provider: format!("{:?}", other).to_lowercase(),
            }),
        }
    }
}

/// Create a memo store from configuration.
pub fn create_store(config: &StoreConfig) -> MemoResult<Arc<dyn MemoStore>> {
    let store = MemoStoreFactory::create(config)?;
    tracing::info!(provider = store.provider_name(), "Memo store ready");
    Ok(store)
}
