//! Application error type and HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Wire representation of an error, embedded in error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error surfaced by services and repositories.
///
/// Each variant carries a human-readable message and a JSON details object
/// for structured context. Converted to an HTTP response via [`IntoResponse`].
#[derive(Debug, Clone)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    /// Converts into the wire [`ErrorInfo`] without an HTTP status.
    pub fn into_error_info(self) -> ErrorInfo {
        let (_, info) = self.into_parts();
        info
    }

    fn into_parts(self) -> (StatusCode, ErrorInfo) {
        match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorInfo {
                    code: "validation_error",
                    message,
                    details,
                },
            ),
            AppError::NotFound { message, details } => (
                StatusCode::NOT_FOUND,
                ErrorInfo {
                    code: "not_found",
                    message,
                    details,
                },
            ),
            AppError::Conflict { message, details } => (
                StatusCode::CONFLICT,
                ErrorInfo {
                    code: "conflict",
                    message,
                    details,
                },
            ),
            AppError::Unauthorized { message, details } => (
                StatusCode::UNAUTHORIZED,
                ErrorInfo {
                    code: "unauthorized",
                    message,
                    details,
                },
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorInfo {
                    code: "internal_error",
                    message,
                    details,
                },
            ),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, info) = self.into_parts();
        let body = ErrorBody { error: info };
        (status, Json(body)).into_response()
    }
}

/// Maps a SQLx error to an [`AppError`].
///
/// Unique constraint violations become [`AppError::Conflict`] so callers can
/// distinguish slug collisions from other database failures; everything else
/// is an opaque internal error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    tracing::error!(error = %e, "database error");
    AppError::internal("Database error", json!({}))
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}
