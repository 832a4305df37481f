//! Bearer-token identity extraction and user resolution.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use clientpulse_core::error::CoreError;
use clientpulse_core::roles::IDENTITY_ROLE_STAFF;
use clientpulse_core::validation::normalize_email;
use clientpulse_db::models::user::User;

use crate::actions::users;
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller as asserted by the identity provider.
///
/// This is the only fact the action layer trusts from the HTTP boundary.
#[derive(Debug, Clone)]
pub struct Identity {
    pub external_id: String,
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

impl Identity {
    pub fn is_staff(&self) -> bool {
        self.role.as_deref() == Some(IDENTITY_ROLE_STAFF)
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| CoreError::Unauthorized("You must be signed in.".into()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;

        Ok(Identity {
            external_id: claims.sub,
            email: normalize_email(&claims.email),
            name: claims.name.filter(|n| !n.trim().is_empty()),
            avatar_url: claims.picture,
            role: claims.role,
        })
    }
}

/// The caller's user row, created (or refreshed) from the identity on the
/// fly. Used by mutating endpoints.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        let user = users::resolve_or_create_user(&state.pool, &identity).await?;
        Ok(CurrentUser(user))
    }
}

/// The caller's existing user row. Rejects with `USER_NOT_FOUND` when the
/// identity has never made a mutating request. Used by read endpoints.
#[derive(Debug, Clone)]
pub struct KnownUser(pub User);

impl FromRequestParts<AppState> for KnownUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        let user = users::find_user(&state.pool, &identity).await?;
        Ok(KnownUser(user))
    }
}
