//! Embedded SQLite memo store.
//!
//! Rows live in a single table with tags stored as a JSON array. Text search
//! runs inside SQLite through a registered `memo_matches` scalar function so
//! that title, content and tags are matched in one query with the same
//! Unicode-aware comparison the rest of the crate uses.
//!
//! # Example
//!
//! ```ignore
//! use memo_stores::SqliteMemoStore;
//!
//! let store = SqliteMemoStore::in_memory()?;
//! ```

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use memo_core::error::{MemoError, MemoResult};
use memo_core::traits::{MemoStore, StoreConfig};
use memo_core::types::{matches_fields, MemoCategory, MemoFilter, MemoFormData, MemoRow};

const COLUMNS: &str = "id, title, content, category, tags, created_at, updated_at";

/// SQLite memo store.
pub struct SqliteMemoStore {
    /// SQLite connection (wrapped in Mutex for Send + Sync).
    conn: Mutex<Connection>,
    /// Quoted table name.
    table: String,
}

impl SqliteMemoStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> MemoResult<Self> {
        Self::open_table(path, "memos")
    }

    /// Open an in-memory store. Contents are lost when the store is dropped.
    pub fn in_memory() -> MemoResult<Self> {
        let conn = Connection::open_in_memory().map_err(unavailable)?;
        Self::with_connection(conn, "memos")
    }

    /// Open a store from configuration.
    pub fn from_config(config: &StoreConfig) -> MemoResult<Self> {
        Self::open_table(&config.path, &config.table)
    }

    fn open_table(path: impl AsRef<Path>, table: &str) -> MemoResult<Self> {
        let path = path.as_ref();
        let conn = if path.to_str() == Some(":memory:") {
            Connection::open_in_memory()
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Connection::open(path)
        }
        .map_err(unavailable)?;

        tracing::debug!(path = %path.display(), table, "Opened SQLite memo store");
        Self::with_connection(conn, table)
    }

    fn with_connection(conn: Connection, table: &str) -> MemoResult<Self> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(MemoError::Configuration(format!(
                "Invalid table name: {}",
                table
            )));
        }

        conn.create_scalar_function(
            "memo_matches",
            4,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let title: String = ctx.get(0)?;
                let content: String = ctx.get(1)?;
                let tags: Option<String> = ctx.get(2)?;
                let query: String = ctx.get(3)?;
                let tags: Vec<String> = tags
                    .as_deref()
                    .and_then(|t| serde_json::from_str(t).ok())
                    .unwrap_or_default();
                Ok(matches_fields(&title, &content, &tags, &query))
            },
        )?;

        let store = Self {
            conn: Mutex::new(conn),
            table: format!("\"{}\"", table),
        };
        store.create_table()?;
        Ok(store)
    }

    /// Create the memo table if it doesn't exist.
    fn create_table(&self) -> MemoResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id         TEXT PRIMARY KEY,
                title      TEXT NOT NULL,
                content    TEXT NOT NULL,
                category   TEXT NOT NULL
                           CHECK (category IN ('personal', 'work', 'study', 'idea', 'other')),
                tags       TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS {index} ON {table}(created_at DESC);
            "#,
            table = self.table,
            index = format!("\"idx_{}_created_at\"", self.table.trim_matches('"')),
        ))?;
        Ok(())
    }

    fn lock(&self) -> MemoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| MemoError::Internal(format!("Failed to acquire lock: {}", e)))
    }

    fn select_one(conn: &Connection, table: &str, id: &str) -> rusqlite::Result<Option<MemoRow>> {
        conn.query_row(
            &format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, table),
            [id],
            row_to_memo,
        )
        .optional()
    }
}

/// Current time at the precision stored on disk.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn parse_ts(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn row_to_memo(row: &Row<'_>) -> rusqlite::Result<MemoRow> {
    let category: String = row.get(3)?;
    let tags: Option<String> = row.get(4)?;

    Ok(MemoRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: MemoCategory::from_str(&category).map_err(|e| conversion_error(3, e))?,
        tags: tags
            .map(|t| serde_json::from_str(&t))
            .transpose()
            .map_err(|e| conversion_error(4, e))?,
        created_at: parse_ts(row, 5)?,
        updated_at: parse_ts(row, 6)?,
    })
}

fn unavailable(err: rusqlite::Error) -> MemoError {
    MemoError::StoreUnavailable {
        message: format!("Failed to open SQLite database: {}", err),
        code: memo_core::error::ErrorCode::StoreUnavailable,
        source: Some(Box::new(err)),
    }
}

#[async_trait]
impl MemoStore for SqliteMemoStore {
    async fn list(&self, filter: &MemoFilter) -> MemoResult<Vec<MemoRow>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {columns} FROM {table}
            WHERE (?1 IS NULL OR category = ?1)
              AND (?2 IS NULL OR memo_matches(title, content, tags, ?2))
            ORDER BY created_at DESC, rowid DESC
            "#,
            columns = COLUMNS,
            table = self.table,
        ))?;

        let category = filter.category.map(|c| c.as_str());
        let rows = stmt
            .query_map(params![category, filter.text.as_deref()], row_to_memo)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    async fn get(&self, id: &str) -> MemoResult<Option<MemoRow>> {
        let conn = self.lock()?;
        Ok(Self::select_one(&conn, &self.table, id)?)
    }

    async fn insert(&self, form: &MemoFormData) -> MemoResult<MemoRow> {
        let conn = self.lock()?;
        let id = uuid::Uuid::new_v4().to_string();
        let ts = now();
        let tags = serde_json::to_string(&form.tags)?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                self.table, COLUMNS
            ),
            params![
                id,
                form.title,
                form.content,
                form.category.as_str(),
                tags,
                format_ts(&ts),
            ],
        )?;

        Ok(MemoRow {
            id,
            title: form.title.clone(),
            content: form.content.clone(),
            category: form.category,
            tags: Some(form.tags.clone()),
            created_at: ts,
            updated_at: ts,
        })
    }

    async fn update(&self, id: &str, form: &MemoFormData) -> MemoResult<MemoRow> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let previous = Self::select_one(&tx, &self.table, id)?
            .ok_or_else(|| MemoError::not_found(id))?;

        // updated_at must move forward even when the clock has not ticked
        let mut ts = now();
        if ts <= previous.updated_at {
            ts = previous.updated_at + Duration::microseconds(1);
        }

        tx.execute(
            &format!(
                "UPDATE {} SET title = ?2, content = ?3, category = ?4, tags = ?5, updated_at = ?6 WHERE id = ?1",
                self.table
            ),
            params![
                id,
                form.title,
                form.content,
                form.category.as_str(),
                serde_json::to_string(&form.tags)?,
                format_ts(&ts),
            ],
        )?;

        let row = Self::select_one(&tx, &self.table, id)?.ok_or_else(|| MemoError::not_found(id))?;
        tx.commit()?;
        Ok(row)
    }

    async fn delete(&self, id: &str) -> MemoResult<u64> {
        let conn = self.lock()?;
        let removed = conn.execute(&format!("DELETE FROM {} WHERE id = ?1", self.table), [id])?;
        Ok(removed as u64)
    }

    async fn delete_all(&self) -> MemoResult<u64> {
        let conn = self.lock()?;
        let removed = conn.execute(&format!("DELETE FROM {}", self.table), [])?;
        Ok(removed as u64)
    }

    async fn count(&self) -> MemoResult<u64> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }

    fn provider_name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> MemoFormData {
        MemoFormData::new(title, "body", MemoCategory::Study)
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = SqliteMemoStore::in_memory().unwrap();
        let row = store.insert(&form("First").with_tags(["a", "b"])).await.unwrap();

        let fetched = store.get(&row.id).await.unwrap().unwrap();
        assert_eq!(fetched, row);
        assert_eq!(fetched.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(fetched.created_at, fetched.updated_at);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = SqliteMemoStore::in_memory().unwrap();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = SqliteMemoStore::in_memory().unwrap();
        let err = store.update("missing", &form("x")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_null_tags_read_as_none() {
        let store = SqliteMemoStore::in_memory().unwrap();
        let row = store.insert(&form("No tags")).await.unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute("UPDATE \"memos\" SET tags = NULL WHERE id = ?1", [&row.id])
                .unwrap();
        }
        let fetched = store.get(&row.id).await.unwrap().unwrap();
        assert_eq!(fetched.tags, None);
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_unknown_category() {
        let store = SqliteMemoStore::in_memory().unwrap();
        let result = {
            let conn = store.lock().unwrap();
            conn.execute(
                "INSERT INTO \"memos\" VALUES ('x', 't', 'c', 'hobby', NULL, '2024-01-01T00:00:00.000000Z', '2024-01-01T00:00:00.000000Z')",
                [],
            )
        };
        // The CHECK constraint refuses the row before it can be read back.
        let err: MemoError = result.unwrap_err().into();
        assert_eq!(err.code(), memo_core::ErrorCode::StoreRejected);
    }

    #[test]
    fn test_rejects_bad_table_name() {
        let config = StoreConfig {
            table: "memos; DROP TABLE x".to_string(),
            ..StoreConfig::in_memory()
        };
        assert!(matches!(
            SqliteMemoStore::from_config(&config),
            Err(MemoError::Configuration(_))
        ));
    }
}
