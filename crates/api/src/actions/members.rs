//! Project collaborators: listing, invitation, role changes, removal and
//! candidate search.

use clientpulse_core::error::CoreError;
use clientpulse_core::roles::ROLE_OWNER;
use clientpulse_core::search::{clamp_limit, like_pattern};
use clientpulse_core::types::DbId;
use clientpulse_core::validation::{normalize_email, validate_input};
use clientpulse_db::models::member::{
    AddMember, CandidateSearch, MemberList, MemberViewer, ProjectMember, UpdateMemberRole,
};
use clientpulse_db::models::user::{User, UserSummary};
use clientpulse_db::repositories::{MemberRepo, UserRepo};
use serde::Serialize;
use sqlx::PgPool;

use super::ProjectAccess;
use crate::error::AppResult;

const DEFAULT_CANDIDATE_LIMIT: i64 = 5;
const MAX_CANDIDATE_LIMIT: i64 = 20;

const OWNER_ONLY: &str = "Only the owner can manage members.";

/// Acknowledgement returned by [`remove_member`].
#[derive(Debug, Clone, Serialize)]
pub struct RemovedMember {
    pub project_id: DbId,
    pub user_id: DbId,
    pub removed: bool,
}

/// Owner first, then members in join order.
pub async fn get_members(pool: &PgPool, user: &User, project_id: DbId) -> AppResult<MemberList> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_member("You do not have access to this project's members.")?;

    let mut members = Vec::new();
    if let Some(owner) = MemberRepo::find_owner_entry(pool, project_id).await? {
        members.push(owner);
    }
    members.extend(MemberRepo::list_with_users(pool, project_id).await?);

    let viewer = MemberViewer {
        role: access.role.clone().unwrap_or_default(),
        can_manage: access.is_owner(),
    };
    Ok(MemberList { members, viewer })
}

/// Add (or re-role) a collaborator, addressed by user id or by email.
pub async fn add_member(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    input: AddMember,
) -> AppResult<ProjectMember> {
    validate_input(&input)?;
    if input.user_id.is_none() && input.email.is_none() {
        return Err(
            CoreError::field_error("email", "A user identifier (id or email) is required.").into(),
        );
    }

    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner(OWNER_ONLY)?;

    let target = match (input.user_id, input.email.as_deref()) {
        (Some(id), _) => UserRepo::find_by_id(pool, id).await?,
        (None, Some(email)) => UserRepo::find_by_email(pool, &normalize_email(email)).await?,
        (None, None) => None,
    }
    .ok_or_else(|| CoreError::NotFound("Target user not found.".into()))?;

    if target.id == access.project.owner_id {
        return Err(
            CoreError::InvalidTarget("Project owner already has full access.".into()).into(),
        );
    }

    let member = MemberRepo::upsert(pool, project_id, target.id, &input.role).await?;
    tracing::info!(project_id, user_id = target.id, role = %member.role, "Member added");
    Ok(member)
}

pub async fn remove_member(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    target_user_id: DbId,
) -> AppResult<RemovedMember> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner(OWNER_ONLY)?;

    if target_user_id == access.project.owner_id {
        return Err(CoreError::InvalidTarget("The project owner cannot be removed.".into()).into());
    }
    if !MemberRepo::remove(pool, project_id, target_user_id).await? {
        return Err(CoreError::NotFound("Member not found.".into()).into());
    }

    tracing::info!(project_id, user_id = target_user_id, "Member removed");
    Ok(RemovedMember {
        project_id,
        user_id: target_user_id,
        removed: true,
    })
}

pub async fn update_member_role(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    target_user_id: DbId,
    input: UpdateMemberRole,
) -> AppResult<ProjectMember> {
    validate_input(&input)?;

    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner(OWNER_ONLY)?;

    if target_user_id == access.project.owner_id {
        return Err(CoreError::InvalidTarget(format!(
            "The project owner always has the {ROLE_OWNER} role."
        ))
        .into());
    }

    let member = MemberRepo::update_role(pool, project_id, target_user_id, &input.role)
        .await?
        .ok_or_else(|| CoreError::NotFound("Member not found.".into()))?;

    tracing::info!(
        project_id,
        user_id = target_user_id,
        role = %member.role,
        "Member role updated"
    );
    Ok(member)
}

/// Users matching `q` by name or email who are neither the owner nor
/// already members. `limit` is clamped to `[1, 20]`, default 5.
pub async fn search_collaborator_candidates(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    params: CandidateSearch,
) -> AppResult<Vec<UserSummary>> {
    validate_input(&params)?;

    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner("Only the owner can invite collaborators.")?;

    let limit = clamp_limit(params.limit, DEFAULT_CANDIDATE_LIMIT, MAX_CANDIDATE_LIMIT);
    let candidates = MemberRepo::search_candidates(
        pool,
        project_id,
        access.project.owner_id,
        &like_pattern(&params.q),
        limit,
    )
    .await?;

    tracing::debug!(project_id, count = candidates.len(), "Collaborator candidates");
    Ok(candidates)
}
