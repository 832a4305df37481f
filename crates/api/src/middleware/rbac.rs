//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use clientpulse_core::error::CoreError;

use super::auth::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the identity-provider `staff` role. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn staff_only(RequireStaff(identity): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub Identity);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if !identity.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )));
        }
        Ok(RequireStaff(identity))
    }
}
