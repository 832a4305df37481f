use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::share_links;
use crate::state::AppState;

/// Share-link management plus the public, unauthenticated share view.
///
/// ```text
/// PATCH  /share-links/{id}  -> update
/// DELETE /share-links/{id}  -> delete
/// GET    /share/{slug}      -> resolve (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/share-links/{id}",
            patch(share_links::update).delete(share_links::delete),
        )
        .route("/share/{slug}", get(share_links::resolve))
}
