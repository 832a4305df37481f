//! Handlers for `/api/projects/{id}/members`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::types::DbId;
use clientpulse_db::models::member::{
    AddMember, CandidateSearch, MemberList, ProjectMember, UpdateMemberRole,
};
use clientpulse_db::models::user::UserSummary;

use crate::actions::members::{self, RemovedMember};
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{CurrentUser, KnownUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/projects/{id}/members
pub async fn list(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<MemberList>>> {
    let list = members::get_members(&state.pool, &user, project_id).await?;
    Ok(Json(DataResponse { data: list }))
}

/// POST /api/projects/{id}/members
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<AddMember>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectMember>>)> {
    let member = members::add_member(&state.pool, &user, project_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: member })))
}

/// PATCH /api/projects/{id}/members/{user_id}
pub async fn update_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath((project_id, user_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateMemberRole>,
) -> AppResult<Json<DataResponse<ProjectMember>>> {
    let member = members::update_member_role(&state.pool, &user, project_id, user_id, input).await?;
    Ok(Json(DataResponse { data: member }))
}

/// DELETE /api/projects/{id}/members/{user_id}
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath((project_id, user_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<RemovedMember>>> {
    let removed = members::remove_member(&state.pool, &user, project_id, user_id).await?;
    Ok(Json(DataResponse { data: removed }))
}

/// GET /api/projects/{id}/members/search?q=&limit=
pub async fn search(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(project_id): AppPath<DbId>,
    AppQuery(params): AppQuery<CandidateSearch>,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    let candidates =
        members::search_collaborator_candidates(&state.pool, &user, project_id, params).await?;
    Ok(Json(DataResponse { data: candidates }))
}
