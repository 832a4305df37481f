pub mod health;
pub mod project;
pub mod share;
pub mod update;
pub mod waitlist;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::openapi;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /me                                          resolved caller (auth)
/// /swagger                                     OpenAPI document (public)
///
/// /projects                                    list, create
/// /projects/{id}                               get, patch, archive (DELETE)
/// /projects/{id}/delete                        permanent delete (POST)
/// /projects/{id}/transfer-ownership            transfer (POST)
/// /projects/{id}/members                       list, add
/// /projects/{id}/members/search                candidate search
/// /projects/{id}/members/{user_id}             change role, remove
/// /projects/{id}/updates                       list (?status, tags, page, pageSize), create
/// /projects/{id}/share-links                   list, create
/// /projects/{id}/clients                       list, add
/// /projects/{id}/clients/search                contact search
/// /projects/{id}/clients/{access_id}           update, remove
///
/// /updates/{id}                                get, patch, delete
///
/// /share-links/{id}                            patch, delete
/// /share/{slug}                                public view (?page, pageSize; x-share-password header)
///
/// /waitlist                                    signup (public), list (staff)
/// /waitlist/{id}                               detail (staff)
/// /waitlist/{id}/status                        status change (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::users::me))
        .route("/swagger", get(openapi::swagger))
        .nest("/projects", project::router())
        .nest("/updates", update::router())
        .merge(share::router())
        .nest("/waitlist", waitlist::router())
}
