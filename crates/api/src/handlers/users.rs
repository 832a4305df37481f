use axum::Json;
use clientpulse_db::models::user::User;

use crate::error::AppResult;
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;

/// GET /api/me
pub async fn me(CurrentUser(user): CurrentUser) -> AppResult<Json<DataResponse<User>>> {
    Ok(Json(DataResponse { data: user }))
}
