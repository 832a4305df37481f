//! Handlers for share-link management and the public share view.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use clientpulse_core::types::DbId;
use clientpulse_db::models::share_link::{
    CreateShareLink, PublicShare, ShareLinkView, UpdateShareLink,
};

use crate::actions::share_links;
use crate::actions::Deleted;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::{CurrentUser, KnownUser};
use crate::query::ShareParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Carries the password for protected share links. Kept out of the query
/// string so it never lands in request logs.
pub const SHARE_PASSWORD_HEADER: &str = "x-share-password";

/// GET /api/projects/{id}/share-links
pub async fn list(
    State(state): State<AppState>,
    KnownUser(user): KnownUser,
    AppPath(project_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<ShareLinkView>>>> {
    let base_url = &state.config.public_base_url;
    let links = share_links::list_share_links(&state.pool, &user, base_url, project_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/projects/{id}/share-links
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(project_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateShareLink>,
) -> AppResult<(StatusCode, Json<DataResponse<ShareLinkView>>)> {
    let base_url = &state.config.public_base_url;
    let link =
        share_links::create_share_link(&state.pool, &user, base_url, project_id, input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PATCH /api/share-links/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateShareLink>,
) -> AppResult<Json<DataResponse<ShareLinkView>>> {
    let base_url = &state.config.public_base_url;
    let link = share_links::update_share_link(&state.pool, &user, base_url, id, input).await?;
    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/share-links/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let deleted = share_links::delete_share_link(&state.pool, &user, id).await?;
    Ok(Json(DataResponse { data: deleted }))
}

/// GET /api/share/{slug} (public)
pub async fn resolve(
    State(state): State<AppState>,
    AppPath(slug): AppPath<String>,
    AppQuery(params): AppQuery<ShareParams>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<PublicShare>>> {
    let password = headers
        .get(SHARE_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());
    let share = share_links::resolve_share(&state.pool, &slug, password, params).await?;
    Ok(Json(DataResponse { data: share }))
}
