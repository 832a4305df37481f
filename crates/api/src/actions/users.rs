//! Identity-to-user resolution.

use clientpulse_core::error::CoreError;
use clientpulse_db::models::user::{UpsertUser, User};
use clientpulse_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::middleware::auth::Identity;

/// Map an identity to its user row, creating it on first sight and
/// refreshing the stored profile otherwise.
pub async fn resolve_or_create_user(pool: &PgPool, identity: &Identity) -> AppResult<User> {
    let input = UpsertUser {
        external_id: identity.external_id.clone(),
        email: identity.email.clone(),
        name: identity.name.clone(),
        avatar_url: identity.avatar_url.clone(),
    };
    let user = UserRepo::upsert(pool, &input).await?;
    tracing::debug!(user_id = user.id, external_id = %user.external_id, "Resolved user");
    Ok(user)
}

/// Look up the user row for an identity without creating it.
pub async fn find_user(pool: &PgPool, identity: &Identity) -> AppResult<User> {
    let user = UserRepo::find_by_external_id(pool, &identity.external_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    Ok(user)
}
