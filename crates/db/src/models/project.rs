//! Project entity model and DTOs.

use clientpulse_core::types::{DbId, Timestamp};
use clientpulse_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::double_option;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_archived: bool,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project as seen by one caller, with that caller's effective role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectListItem {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub is_archived: bool,
    pub owner_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public projection exposed through share links.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for creating a new project. The caller becomes the owner.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(
        length(min = 1, max = 200, message = "Project name must be 1-200 characters"),
        custom(function = "not_blank", message = "Project name is required")
    )]
    pub name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

/// DTO for patching a project. All fields are optional.
///
/// `description: null` clears the description; omitting it leaves it as is.
/// Its length is checked by the action since `validator` skips nested options.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(
        length(min = 1, max = 200, message = "Project name must be 1-200 characters"),
        custom(function = "not_blank", message = "Project name is required")
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub is_archived: Option<bool>,
}

/// DTO for handing a project to an existing collaborator.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransferOwnership {
    #[validate(range(min = 1, message = "A target user id is required"))]
    pub target_user_id: DbId,
}

/// Result of archiving a project.
#[derive(Debug, Clone, Serialize)]
pub struct ArchivedProject {
    pub id: DbId,
    pub is_archived: bool,
}
