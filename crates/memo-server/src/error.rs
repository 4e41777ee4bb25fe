//! Error handling for the REST API server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use memo_core::error::{ErrorCode, MemoError};
use memo_core::Locale;
use serde::Serialize;
use std::fmt;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorCode::MemoNotFound.as_str(), message)
    }

    /// A body or query the extractor could not read. The rejection text is
    /// logged, never returned.
    pub fn invalid_input(locale: Locale, rejection: impl fmt::Display) -> Self {
        tracing::debug!(error = %rejection, "Rejected request input");
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ValInvalidInput.as_str(),
            locale.invalid_input_message(),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValInvalidInput | ErrorCode::ValMissingField => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::MemoNotFound => StatusCode::NOT_FOUND,
        ErrorCode::StoreRejected | ErrorCode::StoreCorruptRow => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Convert from memo-core errors
impl From<MemoError> for ApiError {
    fn from(err: MemoError) -> Self {
        let code = err.code();
        match err {
            // Already localized and free of store detail.
            MemoError::Repository { message, .. } => Self::new(status_for(code), code.as_str(), message),
            MemoError::Validation { message, .. } => Self::new(status_for(code), code.as_str(), message),
            MemoError::NotFound { message, .. } => Self::not_found(message),
            other => {
                tracing::error!(error = %other, code = %code, "Unhandled error in request");
                Self::new(status_for(code), code.as_str(), "Internal server error")
            }
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use memo_core::Operation;

    fn repository_error(code: ErrorCode) -> MemoError {
        MemoError::Repository {
            operation: Operation::List,
            code,
            message: "메모를 불러오는데 실패했습니다.".to_string(),
        }
    }

    #[test]
    fn test_repository_status_mapping() {
        let cases = [
            (ErrorCode::StoreUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (ErrorCode::StoreRejected, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorCode::MemoNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            let err = ApiError::from(repository_error(code));
            assert_eq!(err.status, status);
            assert_eq!(err.code, code.as_str());
            assert_eq!(err.message, "메모를 불러오는데 실패했습니다.");
        }
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let err = ApiError::from(MemoError::missing_field("title"));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "VAL_002");
    }

    #[test]
    fn test_invalid_input_hides_rejection_text() {
        let err = ApiError::invalid_input(Locale::Ko, "missing field `title` at line 1 column 33");
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.code, "VAL_001");
        assert_eq!(err.message, "입력값이 올바르지 않습니다.");
    }

    #[test]
    fn test_unexpected_errors_hide_detail() {
        let err = ApiError::from(MemoError::Internal("lock poisoned at sqlite.rs".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }
}
