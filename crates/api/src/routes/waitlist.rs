use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::waitlist;
use crate::state::AppState;

/// Routes mounted at `/waitlist`.
///
/// ```text
/// POST   /              -> create (public)
/// GET    /              -> list (staff)
/// GET    /{id}          -> get_by_id (staff)
/// PATCH  /{id}/status   -> update_status (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(waitlist::list).post(waitlist::create))
        .route("/{id}", get(waitlist::get_by_id))
        .route("/{id}/status", patch(waitlist::update_status))
}
