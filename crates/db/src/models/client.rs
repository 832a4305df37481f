//! Client contact, access and tag models and DTOs.

use clientpulse_core::client::{validate_status, validate_tag_labels};
use clientpulse_core::types::{DbId, Timestamp};
use clientpulse_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::trimmed;
use super::user::UserSummary;

/// A row from the `client_tags` table.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct ClientTag {
    pub id: DbId,
    pub label: String,
    pub color: Option<String>,
}

/// Flat join of an access row with its contact and inviter.
#[derive(Debug, Clone, FromRow)]
pub struct ClientAccessRow {
    pub access_id: DbId,
    pub project_id: DbId,
    pub client_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub status: String,
    pub invite_token: Option<String>,
    pub invited_by_id: Option<DbId>,
    pub invited_by_name: Option<String>,
    pub invited_by_email: Option<String>,
    pub last_viewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A client's access to one project, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectClient {
    pub access_id: DbId,
    pub project_id: DbId,
    pub client_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub status: String,
    pub invite_token: Option<String>,
    pub invited_by: Option<UserSummary>,
    pub tags: Vec<ClientTag>,
    pub last_viewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ProjectClient {
    pub fn from_row(row: ClientAccessRow, tags: Vec<ClientTag>) -> Self {
        let invited_by = match (row.invited_by_id, row.invited_by_email) {
            (Some(id), Some(email)) => Some(UserSummary {
                id,
                name: row.invited_by_name,
                email,
            }),
            _ => None,
        };
        Self {
            access_id: row.access_id,
            project_id: row.project_id,
            client_id: row.client_id,
            email: row.email,
            name: row.name,
            avatar_url: row.avatar_url,
            role: row.role,
            status: row.status,
            invite_token: row.invite_token,
            invited_by,
            tags,
            last_viewed_at: row.last_viewed_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientsViewer {
    pub can_manage: bool,
}

/// Response of the project client listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectClients {
    pub clients: Vec<ProjectClient>,
    pub available_tags: Vec<ClientTag>,
    pub viewer: ClientsViewer,
}

/// A contact from the owner's address book matching a search.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientCandidate {
    pub client_id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub already_assigned: bool,
}

/// DTO for granting a contact access to a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProjectClient {
    #[validate(email(message = "Invalid email address"))]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,
    #[validate(
        length(min = 1, max = 120, message = "Name must be 1-120 characters"),
        custom(function = "not_blank", message = "Name must not be blank")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_tag_labels"))]
    pub tags: Vec<String>,
}

/// DTO for changing a client's status or replacing its tags.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClientAccess {
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "validate_tag_labels"))]
    pub tags: Option<Vec<String>>,
}
