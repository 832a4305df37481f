//! The authorization-scoped action layer.
//!
//! Every action receives the injected pool and, for authenticated flows, the
//! caller's already-resolved [`User`]. Each one follows the same sequence:
//! validate input, load the target, check the caller's relationship to it,
//! then touch the store. Failures short-circuit as [`AppError`]s; nothing
//! escapes the boundary except through [`AppResult`].
//!
//! [`AppError`]: crate::error::AppError

use clientpulse_core::error::CoreError;
use clientpulse_core::roles::{can_contribute, can_manage_share_links, effective_role, is_owner};
use clientpulse_core::types::DbId;
use clientpulse_db::models::project::Project;
use clientpulse_db::models::user::User;
use clientpulse_db::repositories::{MemberRepo, ProjectRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

pub mod clients;
pub mod members;
pub mod projects;
pub mod share_links;
pub mod updates;
pub mod users;
pub mod waitlist;

/// Acknowledgement returned by delete actions.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    pub id: DbId,
    pub deleted: bool,
}

impl Deleted {
    pub fn new(id: DbId) -> Self {
        Self { id, deleted: true }
    }
}

/// A project together with the caller's effective role on it.
#[derive(Debug, Clone)]
pub struct ProjectAccess {
    pub project: Project,
    /// `OWNER`, `EDITOR`, `VIEWER`, or `None` without access.
    pub role: Option<String>,
}

impl ProjectAccess {
    /// Load `project_id` and work out `user`'s role. Missing project is `NOT_FOUND`.
    pub async fn load(pool: &PgPool, project_id: DbId, user: &User) -> AppResult<Self> {
        let project = ProjectRepo::find_by_id(pool, project_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Project not found.".into()))?;

        let membership = if project.owner_id == user.id {
            None
        } else {
            MemberRepo::find_role(pool, project_id, user.id).await?
        };
        let role = effective_role(project.owner_id, user.id, membership.as_deref())
            .map(str::to_string);

        Ok(Self { project, role })
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn is_owner(&self) -> bool {
        is_owner(self.role())
    }

    /// Owner or any member; otherwise `FORBIDDEN` with `message`.
    pub fn require_member(&self, message: &str) -> Result<(), CoreError> {
        if can_contribute(self.role()) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(message.to_string()))
        }
    }

    /// Owner only; otherwise `FORBIDDEN` with `message`.
    pub fn require_owner(&self, message: &str) -> Result<(), CoreError> {
        if self.is_owner() {
            Ok(())
        } else {
            Err(CoreError::Forbidden(message.to_string()))
        }
    }

    /// Owner or `EDITOR`; otherwise `FORBIDDEN`.
    pub fn require_share_manager(&self) -> Result<(), CoreError> {
        if can_manage_share_links(self.role()) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the owner or an editor can manage share links.".into(),
            ))
        }
    }
}

/// Trim `value`, mapping blank strings to `None`.
pub(crate) fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
