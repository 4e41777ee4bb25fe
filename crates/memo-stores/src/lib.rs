//! memo-stores - Memo store implementations for memo.
//!
//! # Supported Backends
//!
//! - **SQLite** (feature: `sqlite`) - embedded file or in-memory database
//! - **Supabase** (feature: `supabase`) - hosted Postgres through PostgREST

mod factory;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "supabase")]
mod supabase;

// Public exports
pub use factory::{create_store, MemoStoreFactory};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteMemoStore;

#[cfg(feature = "supabase")]
pub use supabase::SupabaseMemoStore;

// Re-export core types for convenience
pub use memo_core::traits::{MemoStore, StoreConfig, StoreProvider};
