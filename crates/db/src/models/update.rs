//! Update (Markdown post) model and DTOs.

use clientpulse_core::types::{DbId, Timestamp};
use clientpulse_core::update::{validate_status, validate_tags};
use clientpulse_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `updates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Update {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub body_md: String,
    pub status: String,
    pub tags: Vec<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for posting an update. `status` defaults to `PUBLISHED`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUpdate {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "not_blank", message = "Title is required")
    )]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Body is required"))]
    pub body_md: String,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

/// DTO for editing an update. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EditUpdate {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "not_blank", message = "Title is required")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank", message = "Body is required"))]
    pub body_md: Option<String>,
    #[validate(custom(function = "validate_tags"))]
    pub tags: Option<Vec<String>>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

/// Filter applied to an update listing. An empty `tags` list matches everything.
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    pub status: Option<String>,
    pub tags: Vec<String>,
}

/// One page of an update listing.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePage {
    pub items: Vec<Update>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}
