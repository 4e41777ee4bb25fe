//! Memo repository: CRUD, category listing and search over a [`MemoStore`].
//!
//! Store diagnostics are logged here and replaced by a localized,
//! operation-level message before reaching the caller.

use std::sync::Arc;

use crate::error::{MemoError, MemoResult, Operation};
use crate::locale::Locale;
use crate::traits::MemoStore;
use crate::types::{Memo, MemoCategory, MemoFilter, MemoFormData};

/// Repository over a single memo store.
pub struct MemoRepository {
    store: Arc<dyn MemoStore>,
    locale: Locale,
}

impl MemoRepository {
    /// Create a repository over the given store.
    pub fn new(store: Arc<dyn MemoStore>, locale: Locale) -> Self {
        Self { store, locale }
    }

    /// Name of the underlying store provider.
    pub fn provider_name(&self) -> &'static str {
        self.store.provider_name()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// All memos, newest first.
    pub async fn list(&self) -> MemoResult<Vec<Memo>> {
        self.fetch(Operation::List, &MemoFilter::all()).await
    }

    /// A single memo, or `None` when the store has no row with this id.
    pub async fn get_by_id(&self, id: &str) -> MemoResult<Option<Memo>> {
        match self.store.get(id).await {
            Ok(row) => Ok(row.map(Memo::from)),
            Err(err) => Err(self.fail(Operation::Get, err)),
        }
    }

    /// Create a memo. The store assigns its id and timestamps.
    pub async fn create(&self, form: &MemoFormData) -> MemoResult<Memo> {
        form.validate()?;
        match self.store.insert(form).await {
            Ok(row) => {
                tracing::debug!(memo_id = %row.id, "Memo created");
                Ok(row.into())
            }
            Err(err) => Err(self.fail(Operation::Create, err)),
        }
    }

    /// Overwrite title, content, category and tags of an existing memo.
    pub async fn update(&self, id: &str, form: &MemoFormData) -> MemoResult<Memo> {
        form.validate()?;
        match self.store.update(id, form).await {
            Ok(row) => {
                tracing::debug!(memo_id = %row.id, "Memo updated");
                Ok(row.into())
            }
            Err(err) => Err(self.fail(Operation::Update, err)),
        }
    }

    /// Delete a memo. Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: &str) -> MemoResult<()> {
        match self.store.delete(id).await {
            Ok(0) => {
                tracing::debug!(memo_id = %id, "Delete matched no memo");
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(err) => Err(self.fail(Operation::Delete, err)),
        }
    }

    /// Memos in one category, newest first.
    pub async fn list_by_category(&self, category: MemoCategory) -> MemoResult<Vec<Memo>> {
        self.fetch(Operation::ListByCategory, &MemoFilter::category(category))
            .await
    }

    /// Memos whose title, content or any tag contains `query`, ignoring case.
    ///
    /// The store evaluates all three fields in a single query, so a memo that
    /// matches only by tag is returned as well.
    pub async fn search(&self, query: &str) -> MemoResult<Vec<Memo>> {
        let memos = self
            .fetch(Operation::Search, &MemoFilter::text(query))
            .await?;
        Ok(memos.into_iter().filter(|m| m.matches(query)).collect())
    }

    /// Delete every memo unconditionally.
    pub async fn clear_all(&self) -> MemoResult<()> {
        match self.store.delete_all().await {
            Ok(removed) => {
                tracing::info!(removed, "Cleared all memos");
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::ClearAll, err)),
        }
    }

    /// Number of stored memos.
    pub async fn count(&self) -> MemoResult<u64> {
        self.store
            .count()
            .await
            .map_err(|err| self.fail(Operation::Count, err))
    }

    async fn fetch(&self, operation: Operation, filter: &MemoFilter) -> MemoResult<Vec<Memo>> {
        match self.store.list(filter).await {
            Ok(rows) => Ok(rows.into_iter().map(Memo::from).collect()),
            Err(err) => Err(self.fail(operation, err)),
        }
    }

    fn fail(&self, operation: Operation, err: MemoError) -> MemoError {
        tracing::error!(
            operation = %operation,
            provider = self.store.provider_name(),
            code = %err.code(),
            error = %err,
            "Memo store operation failed"
        );
        MemoError::Repository {
            operation,
            code: err.code(),
            message: self.locale.failure_message(operation).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::MemoRow;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Store that fails every call with a fixed error kind.
    struct FailingStore {
        unavailable: bool,
    }

    impl FailingStore {
        fn error(&self) -> MemoError {
            if self.unavailable {
                MemoError::store_unavailable("connection refused (db.internal:5432)")
            } else {
                MemoError::store_rejected("violates check constraint \"memos_category_check\"")
            }
        }
    }

    #[async_trait]
    impl MemoStore for FailingStore {
        async fn list(&self, _filter: &MemoFilter) -> MemoResult<Vec<MemoRow>> {
            Err(self.error())
        }
        async fn get(&self, _id: &str) -> MemoResult<Option<MemoRow>> {
            Err(self.error())
        }
        async fn insert(&self, _form: &MemoFormData) -> MemoResult<MemoRow> {
            Err(self.error())
        }
        async fn update(&self, id: &str, _form: &MemoFormData) -> MemoResult<MemoRow> {
            Err(MemoError::not_found(id))
        }
        async fn delete(&self, _id: &str) -> MemoResult<u64> {
            Err(self.error())
        }
        async fn delete_all(&self) -> MemoResult<u64> {
            Err(self.error())
        }
        fn provider_name(&self) -> &'static str {
            "failing"
        }
    }

    /// Store that records how many calls reached it.
    #[derive(Default)]
    struct CountingStore {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl MemoStore for CountingStore {
        async fn list(&self, _filter: &MemoFilter) -> MemoResult<Vec<MemoRow>> {
            *self.calls.lock().unwrap() += 1;
            Ok(Vec::new())
        }
        async fn get(&self, _id: &str) -> MemoResult<Option<MemoRow>> {
            *self.calls.lock().unwrap() += 1;
            Ok(None)
        }
        async fn insert(&self, form: &MemoFormData) -> MemoResult<MemoRow> {
            *self.calls.lock().unwrap() += 1;
            let now = Utc::now();
            Ok(MemoRow {
                id: "new".to_string(),
                title: form.title.clone(),
                content: form.content.clone(),
                category: form.category,
                tags: None,
                created_at: now,
                updated_at: now,
            })
        }
        async fn update(&self, id: &str, _form: &MemoFormData) -> MemoResult<MemoRow> {
            *self.calls.lock().unwrap() += 1;
            Err(MemoError::not_found(id))
        }
        async fn delete(&self, _id: &str) -> MemoResult<u64> {
            *self.calls.lock().unwrap() += 1;
            Ok(0)
        }
        async fn delete_all(&self) -> MemoResult<u64> {
            *self.calls.lock().unwrap() += 1;
            Ok(0)
        }
        fn provider_name(&self) -> &'static str {
            "counting"
        }
    }

    fn form() -> MemoFormData {
        MemoFormData::new("Title", "Body", MemoCategory::Work)
    }

    #[tokio::test]
    async fn test_store_failure_is_localized_and_hides_detail() {
        let repo = MemoRepository::new(Arc::new(FailingStore { unavailable: true }), Locale::En);

        let err = repo.list().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load memos.");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
        assert!(!err.to_string().contains("5432"));

        let err = repo.create(&form()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to create memo.");
    }

    #[tokio::test]
    async fn test_rejected_keeps_rejected_code() {
        let repo = MemoRepository::new(Arc::new(FailingStore { unavailable: false }), Locale::Ko);
        let err = repo.search("x").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StoreRejected);
        assert_eq!(err.to_string(), "메모 검색에 실패했습니다.");
    }

    #[tokio::test]
    async fn test_get_by_id_store_error_is_hard_error() {
        let repo = MemoRepository::new(Arc::new(FailingStore { unavailable: true }), Locale::En);
        assert!(repo.get_by_id("abc").await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found_failure() {
        let repo = MemoRepository::new(Arc::new(FailingStore { unavailable: true }), Locale::En);
        let err = repo.update("missing", &form()).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Failed to update memo.");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        let store = Arc::new(CountingStore::default());
        let repo = MemoRepository::new(store.clone(), Locale::En);

        let bad = MemoFormData::new("", "Body", MemoCategory::Idea);
        let err = repo.create(&bad).await.unwrap_err();
        assert!(matches!(err, MemoError::Validation { .. }));
        let err = repo.update("id", &bad).await.unwrap_err();
        assert!(matches!(err, MemoError::Validation { .. }));

        assert_eq!(*store.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_of_missing_id_is_ok() {
        let repo = MemoRepository::new(Arc::new(CountingStore::default()), Locale::En);
        assert!(repo.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_by_id_absent() {
        let repo = MemoRepository::new(Arc::new(CountingStore::default()), Locale::En);
        assert_eq!(repo.get_by_id("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_defaults_missing_tags() {
        let repo = MemoRepository::new(Arc::new(CountingStore::default()), Locale::En);
        let memo = repo.create(&form()).await.unwrap();
        assert!(memo.tags.is_empty());
        assert_eq!(memo.created_at, memo.updated_at);
    }
}
