//! Project membership model and DTOs.

use clientpulse_core::roles::validate_member_role;
use clientpulse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::trimmed_option;

/// A row from the `project_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMember {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry in a project's collaborator list.
///
/// The owner appears here with the synthesized `OWNER` role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberListItem {
    pub user_id: DbId,
    pub role: String,
    pub name: Option<String>,
    pub email: String,
}

/// The caller's own standing on a project.
#[derive(Debug, Clone, Serialize)]
pub struct MemberViewer {
    pub role: String,
    pub can_manage: bool,
}

/// Response of the collaborator listing.
#[derive(Debug, Clone, Serialize)]
pub struct MemberList {
    pub members: Vec<MemberListItem>,
    pub viewer: MemberViewer,
}

/// DTO for adding (or re-roling) a collaborator, addressed by id or email.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddMember {
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: Option<DbId>,
    #[validate(email(message = "Invalid email address"))]
    #[serde(default, deserialize_with = "trimmed_option")]
    pub email: Option<String>,
    #[validate(custom(function = "validate_member_role"))]
    pub role: String,
}

/// DTO for changing a collaborator's role.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRole {
    #[validate(custom(function = "validate_member_role"))]
    pub role: String,
}

/// Parameters of the collaborator-candidate search.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CandidateSearch {
    #[validate(
        length(min = 1, max = 100, message = "Query must be 1-100 characters"),
        custom(function = "clientpulse_core::validation::not_blank", message = "Query is required")
    )]
    pub q: String,
    pub limit: Option<i64>,
}
