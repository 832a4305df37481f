//! Route definitions for `/projects` and everything scoped under a project.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{clients, members, projects, share_links, updates};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// PATCH  /{id}                            -> update
/// DELETE /{id}                            -> archive
/// POST   /{id}/delete                     -> delete
/// POST   /{id}/transfer-ownership         -> transfer_ownership
///
/// GET    /{id}/members                    -> members::list
/// POST   /{id}/members                    -> members::add
/// GET    /{id}/members/search             -> members::search
/// PATCH  /{id}/members/{user_id}          -> members::update_role
/// DELETE /{id}/members/{user_id}          -> members::remove
///
/// GET    /{id}/updates                    -> updates::list
/// POST   /{id}/updates                    -> updates::create
///
/// GET    /{id}/share-links                -> share_links::list
/// POST   /{id}/share-links                -> share_links::create
///
/// GET    /{id}/clients                    -> clients::list
/// POST   /{id}/clients                    -> clients::create
/// GET    /{id}/clients/search             -> clients::search
/// PATCH  /{id}/clients/{access_id}        -> clients::update
/// DELETE /{id}/clients/{access_id}        -> clients::remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .patch(projects::update)
                .delete(projects::archive),
        )
        .route("/{id}/delete", post(projects::delete))
        .route("/{id}/transfer-ownership", post(projects::transfer_ownership))
        .route("/{id}/members", get(members::list).post(members::add))
        .route("/{id}/members/search", get(members::search))
        .route(
            "/{id}/members/{user_id}",
            patch(members::update_role).delete(members::remove),
        )
        .route("/{id}/updates", get(updates::list).post(updates::create))
        .route(
            "/{id}/share-links",
            get(share_links::list).post(share_links::create),
        )
        .route("/{id}/clients", get(clients::list).post(clients::create))
        .route("/{id}/clients/search", get(clients::search))
        .route(
            "/{id}/clients/{access_id}",
            patch(clients::update).delete(clients::remove),
        )
}
