//! Error types for the HTTP API.
//!
//! Every failure leaves a handler as an [`ApiError`], which renders the
//! error envelope:
//!
//! ```text
//! { "success": false, "error": "Order not found: 7f1c…", "code": "NOT_FOUND" }
//! ```
//!
//! Storage failures never leak details to the client; they are logged here
//! and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jati_core::{ErrorKind, ValidationError};
use jati_db::DbError;
use serde::Serialize;
use tracing::error;

use crate::services::OrderError;

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    InvalidArgument,
    InvalidState,
    Conflict,
    ServiceUnavailable,
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidState => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::InvalidArgument => ErrorCode::InvalidArgument,
            ErrorKind::InvalidState => ErrorCode::InvalidState,
            ErrorKind::Persistence => ErrorCode::InternalError,
        }
    }
}

/// API error: a code plus a client-safe message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }

    pub fn internal() -> Self {
        ApiError::new(ErrorCode::InternalError, "Internal server error")
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err.kind() {
            ErrorKind::Persistence => {
                error!(error = %err, "Order operation failed");
                ApiError::internal()
            }
            kind => ApiError::new(kind.into(), err.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
            _ => {
                error!(error = %err, "Database operation failed");
                ApiError::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            success: bool,
            error: String,
            code: ErrorCode,
        }

        (
            self.code.status(),
            Json(ErrorResponse {
                success: false,
                error: self.message,
                code: self.code,
            }),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use jati_core::CoreError;

    #[test]
    fn test_kind_to_status() {
        let cases = [
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::InvalidArgument, StatusCode::BAD_REQUEST),
            (ErrorKind::InvalidState, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorKind::Persistence, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            assert_eq!(ErrorCode::from(kind).status(), status);
        }
    }

    #[test]
    fn test_persistence_message_is_generic() {
        let err: ApiError = OrderError::Db(DbError::QueryFailed("disk I/O error".into())).into();
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_business_message_is_kept() {
        let err: ApiError = OrderError::Core(CoreError::UnpaidOrder {
            order_id: "abc".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::InvalidState);
        assert_eq!(err.message, "cannot generate receipt for unpaid order abc");
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err: ApiError = DbError::UniqueViolation {
            field: "products.sku".into(),
            value: String::new(),
        }
        .into();
        assert_eq!(err.code.status(), StatusCode::CONFLICT);
    }
}
