use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clientpulse_core::error::CoreError;
use serde_json::json;

/// Message returned in place of any internal failure detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for actions and HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the uniform error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `clientpulse_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request (unparseable body, query or path).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result envelope of every action and handler.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable machine-readable code, as sent in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(core) => core.code(),
            AppError::Database(sqlx::Error::RowNotFound) => "NOT_FOUND",
            AppError::Database(err) if unique_violation(err).is_some() => "CONFLICT",
            AppError::Database(_) => "INTERNAL",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::InternalError(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Core(core) => {
                let code = core.code();
                match core {
                    CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, code, msg, None),
                    CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, code, msg, None),
                    CoreError::UserNotFound => {
                        (StatusCode::NOT_FOUND, code, CoreError::UserNotFound.to_string(), None)
                    }
                    CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, code, msg, None),
                    CoreError::Validation { message, details } => {
                        (StatusCode::BAD_REQUEST, code, message, details)
                    }
                    CoreError::InvalidTarget(msg) => (StatusCode::BAD_REQUEST, code, msg, None),
                    CoreError::Conflict(msg) => (StatusCode::CONFLICT, code, msg, None),
                    CoreError::BadState(msg) => (StatusCode::CONFLICT, code, msg, None),
                    CoreError::Internal(msg) => {
                        tracing::error!(error = %msg, "Internal core error");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            code,
                            INTERNAL_MESSAGE.to_string(),
                            None,
                        )
                    }
                }
            }

            AppError::Database(err) => {
                let (status, code, message) = classify_sqlx_error(&err);
                (status, code, message, None)
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            tracing::warn!(code, %message, "Request rejected");
        }

        let mut error = json!({ "code": code, "message": message });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, axum::Json(json!({ "error": error }))).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = unique_violation(err) {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

/// Name of the violated `uq_*` constraint, if `err` is a unique violation.
fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    // PostgreSQL unique constraint violation: error code 23505
    if db_err.code().as_deref() != Some("23505") {
        return None;
    }
    db_err.constraint().filter(|c| c.starts_with("uq_"))
}
