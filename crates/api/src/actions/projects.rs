//! Project lifecycle: create, list, get, update, archive, delete, transfer.

use clientpulse_core::error::CoreError;
use clientpulse_core::project::{ARCHIVED_TRANSFER_MESSAGE, MAX_DESCRIPTION_LEN};
use clientpulse_core::types::DbId;
use clientpulse_core::validation::validate_input;
use clientpulse_db::models::project::{
    ArchivedProject, CreateProject, Project, ProjectListItem, TransferOwnership, UpdateProject,
};
use clientpulse_db::models::user::User;
use clientpulse_db::repositories::{MemberRepo, ProjectRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use super::{trimmed, Deleted, ProjectAccess};
use crate::error::AppResult;

/// A single project as seen by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    pub role: String,
}

pub async fn create_project(
    pool: &PgPool,
    user: &User,
    input: CreateProject,
) -> AppResult<Project> {
    validate_input(&input)?;

    let input = CreateProject {
        name: input.name.trim().to_string(),
        description: trimmed(input.description.as_deref()),
    };
    let project = ProjectRepo::create(pool, user.id, &input).await?;

    tracing::info!(project_id = project.id, owner_id = user.id, "Project created");
    Ok(project)
}

/// Projects the caller owns or belongs to, newest first.
pub async fn list_projects(pool: &PgPool, user: &User) -> AppResult<Vec<ProjectListItem>> {
    let projects = ProjectRepo::list_for_user(pool, user.id).await?;
    tracing::debug!(user_id = user.id, count = projects.len(), "Listed projects");
    Ok(projects)
}

/// A project visible to the caller. Non-members see `NOT_FOUND` so project
/// existence is not disclosed.
pub async fn get_project(pool: &PgPool, user: &User, project_id: DbId) -> AppResult<ProjectView> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    let Some(role) = access.role else {
        return Err(CoreError::NotFound("Project not found or not accessible.".into()).into());
    };
    Ok(ProjectView {
        project: access.project,
        role,
    })
}

/// Owner-only patch. `description: null` clears it; `is_archived: false`
/// restores an archived project.
pub async fn update_project(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    input: UpdateProject,
) -> AppResult<Project> {
    validate_input(&input)?;
    if let Some(Some(description)) = &input.description {
        if description.chars().count() as u64 > MAX_DESCRIPTION_LEN {
            return Err(CoreError::field_error(
                "description",
                "Description must be at most 2000 characters",
            )
            .into());
        }
    }

    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner("You cannot edit this project.")?;

    let input = UpdateProject {
        name: input.name.as_deref().map(|n| n.trim().to_string()),
        description: input.description.map(|d| trimmed(d.as_deref())),
        is_archived: input.is_archived,
    };
    let project = ProjectRepo::update(pool, project_id, &input)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found.".into()))?;

    tracing::info!(project_id, user_id = user.id, "Project updated");
    Ok(project)
}

pub async fn archive_project(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
) -> AppResult<ArchivedProject> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner("Only the owner can archive a project.")?;

    let project = ProjectRepo::set_archived(pool, project_id, true)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found.".into()))?;

    tracing::info!(project_id, user_id = user.id, "Project archived");
    Ok(ArchivedProject {
        id: project.id,
        is_archived: project.is_archived,
    })
}

/// Owner-only permanent deletion of the project and all of its children.
pub async fn delete_project(pool: &PgPool, user: &User, project_id: DbId) -> AppResult<Deleted> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner("Only the owner can delete a project.")?;

    if !ProjectRepo::delete_cascade(pool, project_id).await? {
        return Err(CoreError::NotFound("Project not found.".into()).into());
    }

    tracing::info!(project_id, user_id = user.id, "Project deleted");
    Ok(Deleted::new(project_id))
}

/// Hand the project to an existing collaborator.
///
/// The previous owner stays on as `EDITOR`; archived projects cannot change
/// hands.
pub async fn transfer_ownership(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    input: TransferOwnership,
) -> AppResult<Project> {
    validate_input(&input)?;

    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Project not found.".into()))?;
    if project.is_archived {
        return Err(CoreError::BadState(ARCHIVED_TRANSFER_MESSAGE.into()).into());
    }
    if project.owner_id != user.id {
        return Err(CoreError::Forbidden("Only the owner can transfer ownership.".into()).into());
    }
    if input.target_user_id == user.id {
        return Err(CoreError::InvalidTarget("You already own this project.".into()).into());
    }

    let target = UserRepo::find_by_id(pool, input.target_user_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Target user not found.".into()))?;
    if MemberRepo::find_role(pool, project_id, target.id).await?.is_none() {
        return Err(CoreError::Forbidden(
            "Ownership can only be transferred to an existing collaborator.".into(),
        )
        .into());
    }

    let project = ProjectRepo::transfer_ownership(pool, project_id, user.id, target.id)
        .await?
        .ok_or_else(|| {
            CoreError::BadState("Project changed during the transfer. Please try again.".into())
        })?;

    tracing::info!(
        project_id,
        previous_owner_id = user.id,
        new_owner_id = target.id,
        "Project ownership transferred"
    );
    Ok(project)
}
