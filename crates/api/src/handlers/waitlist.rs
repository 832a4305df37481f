//! Handlers for `/api/waitlist`.
//!
//! Signups are public; everything else requires [`RequireStaff`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clientpulse_core::types::DbId;
use clientpulse_db::models::waitlist::{
    CreateWaitlistEntry, UpdateWaitlistStatus, WaitlistEntry, WaitlistEntryDetail, WaitlistFilter,
    WaitlistListItem,
};
use clientpulse_db::repositories::waitlist_repo::Submission;

use crate::actions::waitlist;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/waitlist
///
/// 201 for a new signup, 200 when an existing email resubmits.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWaitlistEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<WaitlistEntry>>)> {
    let (entry, submission) = waitlist::create_waitlist_entry(&state.pool, input).await?;
    let status = match submission {
        Submission::Created => StatusCode::CREATED,
        Submission::Resubmitted => StatusCode::OK,
    };
    Ok((status, Json(DataResponse { data: entry })))
}

/// GET /api/waitlist?status=&search=&limit=
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    AppQuery(filter): AppQuery<WaitlistFilter>,
) -> AppResult<Json<DataResponse<Vec<WaitlistListItem>>>> {
    let items = waitlist::list_waitlist_entries(&state.pool, &staff, filter).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/waitlist/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<WaitlistEntryDetail>>> {
    let detail = waitlist::get_waitlist_entry(&state.pool, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/waitlist/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateWaitlistStatus>,
) -> AppResult<Json<DataResponse<WaitlistEntry>>> {
    let entry = waitlist::update_waitlist_status(&state.pool, &staff, id, input).await?;
    Ok(Json(DataResponse { data: entry }))
}
