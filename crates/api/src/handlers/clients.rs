//! Handlers for `/api/projects/{id}/clients`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::types::DbId;
use clientpulse_db::models::client::{
    ClientCandidate, CreateProjectClient, ProjectClient, ProjectClients, UpdateClientAccess,
};
use clientpulse_db::models::member::CandidateSearch;

use crate::actions::clients;
use crate::actions::Deleted;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{CurrentUser, KnownUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/projects/{id}/clients
pub async fn list(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ProjectClients>>> {
    let data = clients::get_project_clients(&state.pool, &user, project_id).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/projects/{id}/clients
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateProjectClient>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectClient>>)> {
    let client = clients::create_project_client(&state.pool, &user, project_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// PATCH /api/projects/{id}/clients/{access_id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath((project_id, access_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateClientAccess>,
) -> AppResult<Json<DataResponse<ProjectClient>>> {
    let client =
        clients::update_client_access(&state.pool, &user, project_id, access_id, input).await?;
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/projects/{id}/clients/{access_id}
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath((project_id, access_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let deleted = clients::remove_client_access(&state.pool, &user, project_id, access_id).await?;
    Ok(Json(DataResponse { data: deleted }))
}

/// GET /api/projects/{id}/clients/search?q=&limit=
pub async fn search(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(project_id): AppPath<DbId>,
    AppQuery(params): AppQuery<CandidateSearch>,
) -> AppResult<Json<DataResponse<Vec<ClientCandidate>>>> {
    let candidates =
        clients::search_client_candidates(&state.pool, &user, project_id, params).await?;
    Ok(Json(DataResponse { data: candidates }))
}
