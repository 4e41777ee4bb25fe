//! Error types for memo operations.
//!
//! Store adapters and LLM providers report detailed failures through
//! [`MemoError`]. The repository and the summarization gateway log that
//! detail and hand callers a short localized message instead.

use std::fmt;

use thiserror::Error;

/// Result type alias for memo operations.
pub type MemoResult<T> = Result<T, MemoError>;

/// Main error type for all memo operations.
#[derive(Error, Debug)]
pub enum MemoError {
    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation { message: String, code: ErrorCode },

    /// Memo not found.
    #[error("Memo not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        memo_id: Option<String>,
    },

    /// The store could not be reached or opened.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The store refused the request (constraint, validation, malformed row).
    #[error("Store rejected request: {message}")]
    StoreRejected {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A repository operation failed. `message` is safe to show to end users.
    #[error("{message}")]
    Repository {
        operation: Operation,
        code: ErrorCode,
        message: String,
    },

    /// LLM operation failed.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Remote memo API returned an error response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider not supported.
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider { provider: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (VAL_xxx)
    ValInvalidInput,
    ValMissingField,

    // Memo (MEMO_xxx)
    MemoNotFound,

    // Store (STORE_xxx)
    StoreUnavailable,
    StoreRejected,
    StoreCorruptRow,

    // LLM (LLM_xxx)
    LlmConnectionFailed,
    LlmGenerationFailed,
    LlmInvalidResponse,

    // Remote API (API_xxx)
    ApiRequestFailed,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValMissingField => "VAL_002",
            ErrorCode::MemoNotFound => "MEMO_001",
            ErrorCode::StoreUnavailable => "STORE_001",
            ErrorCode::StoreRejected => "STORE_002",
            ErrorCode::StoreCorruptRow => "STORE_003",
            ErrorCode::LlmConnectionFailed => "LLM_001",
            ErrorCode::LlmGenerationFailed => "LLM_002",
            ErrorCode::LlmInvalidResponse => "LLM_003",
            ErrorCode::ApiRequestFailed => "API_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository operations, used to pick the user-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
    ListByCategory,
    Search,
    ClearAll,
    Count,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::ListByCategory => "list_by_category",
            Operation::Search => "search",
            Operation::ClearAll => "clear_all",
            Operation::Count => "count",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MemoError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
        }
    }

    /// Create a missing-field validation error.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation {
            message: format!("{} is required", field),
            code: ErrorCode::ValMissingField,
        }
    }

    /// Create a not found error.
    pub fn not_found(memo_id: impl Into<String>) -> Self {
        let id = memo_id.into();
        Self::NotFound {
            message: format!("Memo with id '{}' not found", id),
            code: ErrorCode::MemoNotFound,
            memo_id: Some(id),
        }
    }

    /// Create a store-unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            code: ErrorCode::StoreUnavailable,
            source: None,
        }
    }

    /// Create a store-rejected error.
    pub fn store_rejected(message: impl Into<String>) -> Self {
        Self::StoreRejected {
            message: message.into(),
            code: ErrorCode::StoreRejected,
            source: None,
        }
    }

    /// Create an LLM error.
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
            source: None,
        }
    }

    /// Create an LLM connection error.
    pub fn llm_connection(err: reqwest::Error) -> Self {
        Self::Llm {
            message: err.to_string(),
            code: ErrorCode::LlmConnectionFailed,
            source: Some(Box::new(err)),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::StoreUnavailable { code, .. } => *code,
            Self::StoreRejected { code, .. } => *code,
            Self::Repository { code, .. } => *code,
            Self::Llm { code, .. } => *code,
            Self::Api { .. } => ErrorCode::ApiRequestFailed,
            _ => ErrorCode::Internal,
        }
    }

    /// Whether this error means the requested memo does not exist.
    pub fn is_not_found(&self) -> bool {
        self.code() == ErrorCode::MemoNotFound
    }
}

impl From<reqwest::Error> for MemoError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => Self::Internal(format!("Invalid response body: {}", err)),
            None => Self::Api {
                status: 0,
                message: err.to_string(),
            },
        }
    }
}

impl From<rusqlite::Error> for MemoError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ffi::ErrorCode as SqliteCode;

        let unavailable = matches!(
            &err,
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(
                    e.code,
                    SqliteCode::CannotOpen
                        | SqliteCode::DatabaseBusy
                        | SqliteCode::DatabaseLocked
                        | SqliteCode::NotADatabase
                        | SqliteCode::SystemIoFailure
                        | SqliteCode::PermissionDenied
                )
        );

        if unavailable {
            Self::StoreUnavailable {
                message: err.to_string(),
                code: ErrorCode::StoreUnavailable,
                source: Some(Box::new(err)),
            }
        } else {
            Self::StoreRejected {
                message: err.to_string(),
                code: ErrorCode::StoreRejected,
                source: Some(Box::new(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = MemoError::validation("Invalid input");
        assert_eq!(err.code(), ErrorCode::ValInvalidInput);
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_not_found_error() {
        let err = MemoError::not_found("memo-1");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("memo-1"));
    }

    #[test]
    fn test_repository_error_displays_only_user_message() {
        let err = MemoError::Repository {
            operation: Operation::List,
            code: ErrorCode::StoreUnavailable,
            message: "Failed to load memos.".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to load memos.");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_sqlite_constraint_is_rejected() {
        let err: MemoError = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("NOT NULL constraint failed: memos.title".to_string()),
        )
        .into();
        assert_eq!(err.code(), ErrorCode::StoreRejected);
    }

    #[test]
    fn test_sqlite_cannot_open_is_unavailable() {
        let err: MemoError = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
            None,
        )
        .into();
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::StoreUnavailable.as_str(), "STORE_001");
        assert_eq!(ErrorCode::MemoNotFound.as_str(), "MEMO_001");
        assert_eq!(Operation::ClearAll.to_string(), "clear_all");
    }
}
