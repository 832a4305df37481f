//! Handlers for `/api/projects` and `/api/projects/{id}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::types::DbId;
use clientpulse_db::models::project::{
    ArchivedProject, CreateProject, Project, ProjectListItem, TransferOwnership, UpdateProject,
};

use crate::actions::projects::{self, ProjectView};
use crate::actions::Deleted;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::{CurrentUser, KnownUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let project = projects::create_project(&state.pool, &user, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<DataResponse<Vec<ProjectListItem>>>> {
    let items = projects::list_projects(&state.pool, &user).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let project = projects::get_project(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = projects::update_project(&state.pool, &user, id, input).await?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/projects/{id}
///
/// Archives rather than deletes; permanent removal is `POST .../delete`.
pub async fn archive(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ArchivedProject>>> {
    let archived = projects::archive_project(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: archived }))
}

/// POST /api/projects/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let deleted = projects::delete_project(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: deleted }))
}

/// POST /api/projects/{id}/transfer-ownership
pub async fn transfer_ownership(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<TransferOwnership>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = projects::transfer_ownership(&state.pool, &user, id, input).await?;
    Ok(Json(DataResponse { data: project }))
}
