//! Memo types and the storage-row translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{MemoError, MemoResult};

/// Fixed set of memo categories. Stored and sent on the wire in lowercase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemoCategory {
    Personal,
    Work,
    Study,
    Idea,
    Other,
}

impl MemoCategory {
    /// All categories in display order.
    pub fn all() -> Vec<MemoCategory> {
        Self::iter().collect()
    }

    /// The storage/wire name of this category.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A single user note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Store-assigned identifier.
    pub id: String,
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub category: MemoCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Memo {
    /// Case-insensitive substring match against title, content or any tag.
    pub fn matches(&self, query: &str) -> bool {
        matches_fields(&self.title, &self.content, &self.tags, query)
    }

    /// Whether the memo has been modified since it was created.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Case-insensitive (Unicode lowercase) substring test.
pub fn text_contains(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Shared search predicate used by stores and the repository alike.
pub fn matches_fields(title: &str, content: &str, tags: &[String], query: &str) -> bool {
    text_contains(title, query)
        || text_contains(content, query)
        || tags.iter().any(|tag| text_contains(tag, query))
}

/// User-supplied fields for creating or updating a memo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoFormData {
    pub title: String,
    pub content: String,
    pub category: MemoCategory,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MemoFormData {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: MemoCategory,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Reject missing required fields.
    pub fn validate(&self) -> MemoResult<()> {
        if self.title.trim().is_empty() {
            return Err(MemoError::missing_field("title"));
        }
        if self.content.is_empty() {
            return Err(MemoError::missing_field("content"));
        }
        Ok(())
    }
}

/// A memo as the store holds it. `tags` may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: MemoCategory,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MemoRow> for Memo {
    fn from(row: MemoRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            category: row.category,
            tags: row.tags.unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Filter applied by a store when reading memos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoFilter {
    /// Exact category match.
    pub category: Option<MemoCategory>,
    /// Case-insensitive substring of title, content or any tag.
    pub text: Option<String>,
}

impl MemoFilter {
    /// No filtering.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category: MemoCategory) -> Self {
        Self {
            category: Some(category),
            text: None,
        }
    }

    pub fn text(query: impl Into<String>) -> Self {
        Self {
            category: None,
            text: Some(query.into()),
        }
    }

    /// Apply the filter to a row in process.
    pub fn accepts(&self, row: &MemoRow) -> bool {
        if let Some(category) = self.category {
            if row.category != category {
                return false;
            }
        }
        match &self.text {
            Some(query) => matches_fields(
                &row.title,
                &row.content,
                row.tags.as_deref().unwrap_or(&[]),
                query,
            ),
            None => true,
        }
    }
}
