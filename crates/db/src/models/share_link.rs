//! Share-link model and DTOs.

use clientpulse_core::share_link::{
    share_url, validate_password, validate_slug, validate_visibility,
};
use clientpulse_core::types::{DbId, Timestamp};
use clientpulse_core::update::validate_tags;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::double_option;
use super::project::ProjectSummary;
use super::update::Update;

/// A row from the `share_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShareLink {
    pub id: DbId,
    pub project_id: DbId,
    pub slug: String,
    pub enabled: bool,
    pub visibility: String,
    pub tag_filter: Vec<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A share link as returned to project collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct ShareLinkView {
    #[serde(flatten)]
    pub link: ShareLink,
    pub has_password: bool,
    pub share_url: String,
}

impl ShareLinkView {
    /// Attach the public URL derived from `base_url`.
    pub fn new(link: ShareLink, base_url: &str) -> Self {
        Self {
            has_password: link.password_hash.is_some(),
            share_url: share_url(base_url, &link.slug),
            link,
        }
    }
}

/// DTO for creating a share link. A slug is generated when omitted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateShareLink {
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(custom(function = "validate_visibility"))]
    pub visibility: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tag_filter: Vec<String>,
    #[validate(custom(function = "validate_password"))]
    pub password: Option<String>,
}

/// DTO for editing a share link.
///
/// `password: null` removes protection. `regenerate_slug` swaps the slug for
/// a fresh random one, so links using the old slug stop resolving.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShareLink {
    pub enabled: Option<bool>,
    #[validate(custom(function = "validate_visibility"))]
    pub visibility: Option<String>,
    #[validate(custom(function = "validate_tags"))]
    pub tag_filter: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub password: Option<Option<String>>,
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub regenerate_slug: bool,
}

/// Resolved column changes for a share-link update.
///
/// `password_hash` follows the same absent/null convention as the DTO.
#[derive(Debug, Clone, Default)]
pub struct ShareLinkChanges {
    pub slug: Option<String>,
    pub enabled: Option<bool>,
    pub visibility: Option<String>,
    pub tag_filter: Option<Vec<String>>,
    pub password_hash: Option<Option<String>>,
}

/// Link settings disclosed to anonymous viewers.
#[derive(Debug, Clone, Serialize)]
pub struct PublicShareLink {
    pub slug: String,
    pub visibility: String,
    pub tag_filter: Vec<String>,
}

/// Payload of a public share resolution.
#[derive(Debug, Clone, Serialize)]
pub struct PublicShare {
    pub link: PublicShareLink,
    pub project: ProjectSummary,
    pub items: Vec<Update>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}
