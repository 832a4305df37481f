use axum::routing::get;
use axum::Router;

use crate::handlers::updates;
use crate::state::AppState;

/// Routes mounted at `/updates`.
///
/// ```text
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(updates::get_by_id)
            .patch(updates::update)
            .delete(updates::delete),
    )
}
