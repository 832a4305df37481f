//! Share links: slug-addressed, optionally password-protected, read-only
//! views of a project's updates.

use clientpulse_core::error::CoreError;
use clientpulse_core::search::PageRequest;
use clientpulse_core::share_link::{
    generate_slug, published_only, validate_password, VISIBILITY_ALL,
};
use clientpulse_core::types::DbId;
use clientpulse_core::update::{normalize_tags, STATUS_PUBLISHED};
use clientpulse_core::validation::validate_input;
use clientpulse_db::models::share_link::{
    CreateShareLink, PublicShare, PublicShareLink, ShareLink, ShareLinkChanges, ShareLinkView,
    UpdateShareLink,
};
use clientpulse_db::models::update::UpdateFilter;
use clientpulse_db::models::user::User;
use clientpulse_db::repositories::{ProjectRepo, ShareLinkRepo, UpdateRepo};
use sqlx::PgPool;

use super::{Deleted, ProjectAccess};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::query::ShareParams;

const SLUG_TAKEN: &str = "Slug is already in use.";

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

async fn ensure_slug_free(pool: &PgPool, slug: &str) -> AppResult<()> {
    if ShareLinkRepo::find_by_slug(pool, slug).await?.is_some() {
        return Err(CoreError::Conflict(SLUG_TAKEN.into()).into());
    }
    Ok(())
}

pub async fn list_share_links(
    pool: &PgPool,
    user: &User,
    base_url: &str,
    project_id: DbId,
) -> AppResult<Vec<ShareLinkView>> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_member("You do not have access to this project's share links.")?;

    let links = ShareLinkRepo::list_for_project(pool, project_id).await?;
    Ok(links
        .into_iter()
        .map(|link| ShareLinkView::new(link, base_url))
        .collect())
}

/// Owner or editor only. A random slug is generated when none is given.
pub async fn create_share_link(
    pool: &PgPool,
    user: &User,
    base_url: &str,
    project_id: DbId,
    input: CreateShareLink,
) -> AppResult<ShareLinkView> {
    validate_input(&input)?;

    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_share_manager()?;

    let slug = match input.slug {
        Some(slug) => {
            ensure_slug_free(pool, &slug).await?;
            slug
        }
        None => generate_slug(),
    };
    let visibility = input.visibility.as_deref().unwrap_or(VISIBILITY_ALL);
    let password_hash = input.password.as_deref().map(hash).transpose()?;

    let link = ShareLinkRepo::create(
        pool,
        project_id,
        &slug,
        visibility,
        &normalize_tags(&input.tag_filter),
        password_hash.as_deref(),
    )
    .await?;

    tracing::info!(share_link_id = link.id, project_id, user_id = user.id, "Share link created");
    Ok(ShareLinkView::new(link, base_url))
}

/// `password: null` removes protection; `regenerate_slug` wins over `slug`.
pub async fn update_share_link(
    pool: &PgPool,
    user: &User,
    base_url: &str,
    link_id: DbId,
    input: UpdateShareLink,
) -> AppResult<ShareLinkView> {
    validate_input(&input)?;
    if let Some(Some(password)) = &input.password {
        if let Err(err) = validate_password(password) {
            let message = err.message.as_deref().unwrap_or("Invalid password");
            return Err(CoreError::field_error("password", message).into());
        }
    }

    let link = load_link(pool, link_id).await?;
    let access = ProjectAccess::load(pool, link.project_id, user).await?;
    access.require_share_manager()?;

    let slug = if input.regenerate_slug {
        Some(generate_slug())
    } else {
        match input.slug {
            Some(slug) if slug != link.slug => {
                ensure_slug_free(pool, &slug).await?;
                Some(slug)
            }
            _ => None,
        }
    };
    let password_hash = match input.password {
        Some(Some(password)) => Some(Some(hash(&password)?)),
        Some(None) => Some(None),
        None => None,
    };

    let changes = ShareLinkChanges {
        slug,
        enabled: input.enabled,
        visibility: input.visibility,
        tag_filter: input.tag_filter.map(|t| normalize_tags(&t)),
        password_hash,
    };
    let link = ShareLinkRepo::update(pool, link_id, &changes)
        .await?
        .ok_or_else(|| CoreError::NotFound("Share link not found.".into()))?;

    tracing::info!(share_link_id = link_id, user_id = user.id, "Share link updated");
    Ok(ShareLinkView::new(link, base_url))
}

pub async fn delete_share_link(pool: &PgPool, user: &User, link_id: DbId) -> AppResult<Deleted> {
    let link = load_link(pool, link_id).await?;
    let access = ProjectAccess::load(pool, link.project_id, user).await?;
    access.require_share_manager()?;

    if !ShareLinkRepo::delete(pool, link_id).await? {
        return Err(CoreError::NotFound("Share link not found.".into()).into());
    }

    tracing::info!(share_link_id = link_id, user_id = user.id, "Share link deleted");
    Ok(Deleted::new(link_id))
}

async fn load_link(pool: &PgPool, link_id: DbId) -> AppResult<ShareLink> {
    let link = ShareLinkRepo::find_by_id(pool, link_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Share link not found.".into()))?;
    Ok(link)
}

/// Anonymous read of a share link.
///
/// Unknown and disabled slugs are indistinguishable. Protected links need
/// the matching password. The link's tag filter and visibility are applied
/// to the project's updates.
pub async fn resolve_share(
    pool: &PgPool,
    slug: &str,
    password: Option<&str>,
    params: ShareParams,
) -> AppResult<PublicShare> {
    let link = ShareLinkRepo::find_by_slug(pool, slug)
        .await?
        .filter(|link| link.enabled)
        .ok_or_else(|| CoreError::NotFound("Share link not found or disabled.".into()))?;

    if let Some(stored) = link.password_hash.as_deref() {
        let Some(password) = password else {
            return Err(
                CoreError::Unauthorized("This share link is password protected.".into()).into(),
            );
        };
        let matches = verify_password(password, stored)
            .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
        if !matches {
            return Err(CoreError::Unauthorized("Incorrect share link password.".into()).into());
        }
    }

    let project = ProjectRepo::find_summary(pool, link.project_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Share link not found or disabled.".into()))?;

    let page = PageRequest::new(params.page, params.page_size);
    let filter = UpdateFilter {
        status: published_only(&link.visibility).then(|| STATUS_PUBLISHED.to_string()),
        tags: link.tag_filter.clone(),
    };
    let items =
        UpdateRepo::list(pool, link.project_id, &filter, page.page_size, page.offset()).await?;
    let total = UpdateRepo::count(pool, link.project_id, &filter).await?;

    tracing::debug!(share_link_id = link.id, project_id = link.project_id, total, "Share resolved");
    Ok(PublicShare {
        link: PublicShareLink {
            slug: link.slug,
            visibility: link.visibility,
            tag_filter: link.tag_filter,
        },
        project,
        items,
        page: page.page,
        page_size: page.page_size,
        total,
    })
}
