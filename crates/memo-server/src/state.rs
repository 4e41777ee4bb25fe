//! Server state management.

use std::sync::Arc;

use memo_core::{Locale, MemoRepository, SummarizationGateway};

/// Shared application state.
///
/// Both components are immutable after startup, so handlers share them
/// without locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: MemoRepository,
    gateway: SummarizationGateway,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: MemoRepository, gateway: SummarizationGateway) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository,
                gateway,
            }),
        }
    }

    pub fn repository(&self) -> &MemoRepository {
        &self.inner.repository
    }

    pub fn gateway(&self) -> &SummarizationGateway {
        &self.inner.gateway
    }

    /// Language for user-facing messages.
    pub fn locale(&self) -> Locale {
        self.inner.repository.locale()
    }
}
