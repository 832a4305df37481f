//! Bridge between `validator` derive output and [`CoreError`].
//!
//! Input DTOs derive [`Validate`]; actions call [`validate_input`] before
//! touching the store so malformed payloads short-circuit with field-level
//! details.

use std::borrow::Cow;
use std::collections::BTreeMap;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Run the derived validation for `input`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation {
            message: "Invalid input.".to_string(),
            details: Some(flatten(&errors)),
        }
    }
}

/// Render errors as `{"field_errors": {"field": ["message", ...]}}`.
///
/// Fields are sorted so the payload is deterministic.
pub fn flatten(errors: &ValidationErrors) -> serde_json::Value {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| match &e.message {
                Some(msg) => msg.to_string(),
                None => e.code.to_string(),
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    serde_json::json!({ "field_errors": fields })
}

/// Build a [`ValidationError`] with a human-readable message.
pub fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Reject strings that are empty once trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "Must not be blank"));
    }
    Ok(())
}

/// Lowercase and trim an email address before lookup or storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
