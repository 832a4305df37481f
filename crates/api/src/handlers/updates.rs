//! Handlers for project updates.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::types::DbId;
use clientpulse_db::models::update::{CreateUpdate, EditUpdate, Update, UpdatePage};

use crate::actions::updates;
use crate::actions::Deleted;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{CurrentUser, KnownUser};
use crate::query::UpdateListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/projects/{id}/updates
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateUpdate>,
) -> AppResult<(StatusCode, Json<DataResponse<Update>>)> {
    let update = updates::create_update(&state.pool, &user, project_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: update })))
}

/// GET /api/projects/{id}/updates?status=&tags=a,b&page=&pageSize=
pub async fn list(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(project_id): AppPath<DbId>,
    AppQuery(params): AppQuery<UpdateListParams>,
) -> AppResult<Json<DataResponse<UpdatePage>>> {
    let page = updates::list_updates(&state.pool, &user, project_id, params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/updates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Update>>> {
    let update = updates::get_update(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: update }))
}

/// PATCH /api/updates/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<EditUpdate>,
) -> AppResult<Json<DataResponse<Update>>> {
    let update = updates::update_update(&state.pool, &user, id, input).await?;
    Ok(Json(DataResponse { data: update }))
}

/// DELETE /api/updates/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let deleted = updates::delete_update(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: deleted }))
}
