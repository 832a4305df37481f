//! Client access: the owner's contacts granted per-project access, with
//! per-project tags.

use std::collections::HashMap;

use clientpulse_core::error::CoreError;
use clientpulse_core::search::{clamp_limit, like_pattern};
use clientpulse_core::types::DbId;
use clientpulse_core::update::normalize_tags;
use clientpulse_core::validation::{normalize_email, validate_input};
use clientpulse_db::models::client::{
    ClientCandidate, ClientTag, ClientsViewer, CreateProjectClient, ProjectClient, ProjectClients,
    UpdateClientAccess,
};
use clientpulse_db::models::member::CandidateSearch;
use clientpulse_db::models::user::User;
use clientpulse_db::repositories::client_repo::NewClientAccess;
use clientpulse_db::repositories::ClientRepo;
use sqlx::PgPool;
use uuid::Uuid;

use super::{trimmed, Deleted, ProjectAccess};
use crate::error::AppResult;

const OWNER_ONLY: &str = "Only the project owner can manage clients.";

const DEFAULT_CANDIDATE_LIMIT: i64 = 5;
const MAX_CANDIDATE_LIMIT: i64 = 20;

fn access_not_found() -> CoreError {
    CoreError::NotFound("Client access not found.".into())
}

/// Project access plus its tags, as returned after every mutation.
async fn load_client(pool: &PgPool, access_id: DbId) -> AppResult<ProjectClient> {
    let row = ClientRepo::find_access(pool, access_id)
        .await?
        .ok_or_else(access_not_found)?;
    let tags = ClientRepo::tags_for_access(pool, &[access_id])
        .await?
        .into_iter()
        .map(|(_, tag)| tag)
        .collect();
    Ok(ProjectClient::from_row(row, tags))
}

/// Owner-only access check that also confirms the project is visible to
/// the caller.
async fn load_managed(pool: &PgPool, user: &User, project_id: DbId) -> AppResult<ProjectAccess> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_owner(OWNER_ONLY)?;
    Ok(access)
}

/// Clients on a project with their tags. Non-members get `NOT_FOUND`.
pub async fn get_project_clients(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
) -> AppResult<ProjectClients> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    if access.role.is_none() {
        return Err(CoreError::NotFound("Project not found or not accessible.".into()).into());
    }

    let rows = ClientRepo::list_access(pool, project_id).await?;
    let ids: Vec<DbId> = rows.iter().map(|r| r.access_id).collect();
    let mut tags_by_access: HashMap<DbId, Vec<ClientTag>> = HashMap::new();
    for (access_id, tag) in ClientRepo::tags_for_access(pool, &ids).await? {
        tags_by_access.entry(access_id).or_default().push(tag);
    }

    let clients = rows
        .into_iter()
        .map(|row| {
            let tags = tags_by_access.remove(&row.access_id).unwrap_or_default();
            ProjectClient::from_row(row, tags)
        })
        .collect();
    let available_tags = ClientRepo::list_tags(pool, project_id).await?;

    Ok(ProjectClients {
        clients,
        available_tags,
        viewer: ClientsViewer {
            can_manage: access.is_owner(),
        },
    })
}

/// Grant a contact access, creating the contact in the owner's address
/// book when needed. The new access starts `PENDING` with a fresh invite
/// token.
pub async fn create_project_client(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    input: CreateProjectClient,
) -> AppResult<ProjectClient> {
    validate_input(&input)?;
    let access = load_managed(pool, user, project_id).await?;

    let email = normalize_email(&input.email);
    let name = trimmed(input.name.as_deref());
    let tags = normalize_tags(&input.tags);
    let invite_token = Uuid::new_v4().to_string();

    let new_access = NewClientAccess {
        project_id,
        owner_id: access.project.owner_id,
        email: &email,
        name: name.as_deref(),
        tags: &tags,
        invite_token: &invite_token,
    };
    let access_id = ClientRepo::create_access(pool, &new_access)
        .await?
        .ok_or_else(|| CoreError::Conflict("Client already added to this project.".into()))?;

    tracing::info!(access_id, project_id, user_id = user.id, "Client added to project");
    load_client(pool, access_id).await
}

/// Change status and/or replace the tag set of one access row.
pub async fn update_client_access(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    access_id: DbId,
    input: UpdateClientAccess,
) -> AppResult<ProjectClient> {
    validate_input(&input)?;
    load_managed(pool, user, project_id).await?;

    let row = ClientRepo::find_access(pool, access_id)
        .await?
        .filter(|row| row.project_id == project_id)
        .ok_or_else(access_not_found)?;

    let tags = input.tags.as_deref().map(normalize_tags);
    ClientRepo::update_access(
        pool,
        project_id,
        row.access_id,
        input.status.as_deref(),
        tags.as_deref(),
    )
    .await?;

    tracing::info!(access_id, project_id, user_id = user.id, "Client access updated");
    load_client(pool, access_id).await
}

pub async fn remove_client_access(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    access_id: DbId,
) -> AppResult<Deleted> {
    load_managed(pool, user, project_id).await?;

    ClientRepo::find_access(pool, access_id)
        .await?
        .filter(|row| row.project_id == project_id)
        .ok_or_else(access_not_found)?;
    if !ClientRepo::remove_access(pool, access_id).await? {
        return Err(access_not_found().into());
    }

    tracing::info!(access_id, project_id, user_id = user.id, "Client access removed");
    Ok(Deleted::new(access_id))
}

/// The owner's contacts matching `q`, flagged when already on this project.
pub async fn search_client_candidates(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    params: CandidateSearch,
) -> AppResult<Vec<ClientCandidate>> {
    validate_input(&params)?;
    let access = load_managed(pool, user, project_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_CANDIDATE_LIMIT, MAX_CANDIDATE_LIMIT);
    let candidates = ClientRepo::search_candidates(
        pool,
        access.project.owner_id,
        project_id,
        &like_pattern(&params.q),
        limit,
    )
    .await?;
    Ok(candidates)
}
