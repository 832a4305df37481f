/// Domain error taxonomy shared by every action.
///
/// The set is flat on purpose: callers branch on [`CoreError::code`], which
/// is also the `code` field of the JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("User profile not found")]
    UserNotFound,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidTarget(String),

    #[error("{0}")]
    BadState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A validation failure without field-level details.
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// A validation failure attributed to a single input field.
    pub fn field_error(field: &str, message: &str) -> Self {
        CoreError::Validation {
            message: "Invalid input.".to_string(),
            details: Some(serde_json::json!({ "field_errors": { field: [message] } })),
        }
    }

    /// Stable machine-readable code used in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Unauthorized(_) => "UNAUTHORIZED",
            CoreError::UserNotFound => "USER_NOT_FOUND",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Forbidden(_) => "FORBIDDEN",
            CoreError::Validation { .. } => "VALIDATION_ERROR",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::InvalidTarget(_) => "INVALID_TARGET",
            CoreError::BadState(_) => "BAD_STATE",
            CoreError::Internal(_) => "INTERNAL",
        }
    }
}
