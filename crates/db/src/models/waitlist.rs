//! Waitlist entry and event models and DTOs.

use clientpulse_core::types::{DbId, Timestamp};
use clientpulse_core::validation::not_blank;
use clientpulse_core::waitlist::{validate_metadata, validate_status};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::trimmed;

/// A row from the `waitlist_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitlistEntry {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub goals: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub status: String,
    pub converted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the append-only `waitlist_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitlistEvent {
    pub id: DbId,
    pub entry_id: DbId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub event_type: String,
    pub notes: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// An entry annotated with its most recent event.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistListItem {
    #[serde(flatten)]
    pub entry: WaitlistEntry,
    pub latest_event: Option<WaitlistEvent>,
}

/// An entry with its full event history, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistEntryDetail {
    #[serde(flatten)]
    pub entry: WaitlistEntry,
    pub events: Vec<WaitlistEvent>,
}

/// Public signup payload. Resubmitting an email updates the existing entry.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateWaitlistEntry {
    #[validate(
        length(min = 1, max = 320, message = "Email is required"),
        email(message = "Invalid email address")
    )]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,
    #[validate(
        length(min = 1, max = 200, message = "Full name must be 1-200 characters"),
        custom(function = "not_blank", message = "Full name is required")
    )]
    pub full_name: Option<String>,
    #[validate(length(max = 200, message = "Company must be at most 200 characters"))]
    pub company: Option<String>,
    #[validate(length(max = 2000, message = "Goals must be at most 2000 characters"))]
    pub goals: Option<String>,
    #[validate(length(max = 200, message = "Source must be at most 200 characters"))]
    pub source: Option<String>,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(custom(function = "validate_metadata"))]
    pub metadata: Option<serde_json::Value>,
}

/// Staff payload for moving an entry to a new status.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateWaitlistStatus {
    #[validate(custom(function = "validate_status"))]
    pub status: String,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Staff listing filter.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WaitlistFilter {
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(length(max = 200, message = "Search must be at most 200 characters"))]
    pub search: Option<String>,
    pub limit: Option<i64>,
}
