//! Waitlist status vocabulary, event types and conversion bookkeeping.

use validator::ValidationError;

use crate::types::Timestamp;
use crate::validation::error;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Initial status for a new signup.
pub const STATUS_PENDING: &str = "PENDING";
/// Staff have started a conversation with the lead.
pub const STATUS_ENGAGED: &str = "ENGAGED";
/// The lead became a customer.
pub const STATUS_CONVERTED: &str = "CONVERTED";
/// The lead asked to be left alone.
pub const STATUS_OPTED_OUT: &str = "OPTED_OUT";

/// All valid waitlist statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ENGAGED,
    STATUS_CONVERTED,
    STATUS_OPTED_OUT,
];

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

pub const EVENT_STATUS_CHANGE: &str = "STATUS_CHANGE";
pub const EVENT_NOTE: &str = "NOTE";
pub const EVENT_COMMUNICATION: &str = "COMMUNICATION";

/// Payload `reason` recorded when an email signs up a second time.
pub const REASON_RESUBMITTED: &str = "resubmitted";

// ---------------------------------------------------------------------------
// Listing limits
// ---------------------------------------------------------------------------

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 100;

/// `validator` hook: status must be one of [`VALID_STATUSES`].
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(error(
            "invalid_status",
            format!("Status must be one of: {}", VALID_STATUSES.join(", ")),
        ))
    }
}

/// `validator` hook: metadata, when present, must be a JSON object.
pub fn validate_metadata(metadata: &serde_json::Value) -> Result<(), ValidationError> {
    if metadata.is_object() {
        Ok(())
    } else {
        Err(error("invalid_metadata", "Metadata must be a JSON object"))
    }
}

/// Compute `converted_at` after moving from `previous` to `next`.
///
/// Entering `CONVERTED` stamps `now`; leaving it clears the timestamp; any
/// other transition keeps `current` untouched.
pub fn next_converted_at(
    previous: &str,
    next: &str,
    current: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    if next == STATUS_CONVERTED {
        Some(now)
    } else if previous == STATUS_CONVERTED {
        None
    } else {
        current
    }
}

/// Payload stored on a `STATUS_CHANGE` event.
pub fn status_change_payload(previous: &str, next: &str) -> serde_json::Value {
    serde_json::json!({ "previousStatus": previous, "nextStatus": next })
}
