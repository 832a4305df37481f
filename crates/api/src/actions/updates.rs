//! Project updates: Markdown posts with a status and free-form tags.

use clientpulse_core::error::CoreError;
use clientpulse_core::search::PageRequest;
use clientpulse_core::types::DbId;
use clientpulse_core::update::{normalize_tags, validate_status};
use clientpulse_core::validation::validate_input;
use clientpulse_db::models::update::{CreateUpdate, EditUpdate, Update, UpdateFilter, UpdatePage};
use clientpulse_db::models::user::User;
use clientpulse_db::repositories::UpdateRepo;
use sqlx::PgPool;

use super::{Deleted, ProjectAccess};
use crate::error::AppResult;
use crate::query::UpdateListParams;

const NO_ACCESS: &str = "You do not have access to this project's updates.";

pub async fn create_update(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    input: CreateUpdate,
) -> AppResult<Update> {
    validate_input(&input)?;

    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_member("You cannot post updates to this project.")?;

    let input = CreateUpdate {
        title: input.title.trim().to_string(),
        tags: normalize_tags(&input.tags),
        ..input
    };
    let update = UpdateRepo::create(pool, project_id, user.id, &input).await?;

    tracing::info!(update_id = update.id, project_id, user_id = user.id, "Update created");
    Ok(update)
}

/// Newest first, filtered by status and by a tag superset.
pub async fn list_updates(
    pool: &PgPool,
    user: &User,
    project_id: DbId,
    params: UpdateListParams,
) -> AppResult<UpdatePage> {
    let access = ProjectAccess::load(pool, project_id, user).await?;
    access.require_member(NO_ACCESS)?;

    if let Some(status) = params.status.as_deref() {
        if let Err(err) = validate_status(status) {
            let message = err.message.as_deref().unwrap_or("Invalid status");
            return Err(CoreError::field_error("status", message).into());
        }
    }

    let page = PageRequest::new(params.page, params.page_size);
    let filter = UpdateFilter {
        status: params.status.clone(),
        tags: params.tag_list(),
    };
    let items = UpdateRepo::list(pool, project_id, &filter, page.page_size, page.offset()).await?;
    let total = UpdateRepo::count(pool, project_id, &filter).await?;

    tracing::debug!(project_id, page = page.page, total, "Listed updates");
    Ok(UpdatePage {
        items,
        page: page.page,
        page_size: page.page_size,
        total,
    })
}

/// An update plus the caller's access to its project.
async fn load_update(
    pool: &PgPool,
    user: &User,
    update_id: DbId,
) -> AppResult<(Update, ProjectAccess)> {
    let update = UpdateRepo::find_by_id(pool, update_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Update not found.".into()))?;
    let access = ProjectAccess::load(pool, update.project_id, user).await?;
    Ok((update, access))
}

pub async fn get_update(pool: &PgPool, user: &User, update_id: DbId) -> AppResult<Update> {
    let (update, access) = load_update(pool, user, update_id).await?;
    access.require_member(NO_ACCESS)?;
    Ok(update)
}

/// Partial edit; absent fields are left unchanged.
pub async fn update_update(
    pool: &PgPool,
    user: &User,
    update_id: DbId,
    input: EditUpdate,
) -> AppResult<Update> {
    validate_input(&input)?;

    let (_, access) = load_update(pool, user, update_id).await?;
    access.require_member("You cannot edit updates in this project.")?;

    let input = EditUpdate {
        title: input.title.map(|t| t.trim().to_string()),
        tags: input.tags.map(|t| normalize_tags(&t)),
        ..input
    };
    let update = UpdateRepo::update(pool, update_id, &input)
        .await?
        .ok_or_else(|| CoreError::NotFound("Update not found.".into()))?;

    tracing::info!(update_id, user_id = user.id, "Update edited");
    Ok(update)
}

pub async fn delete_update(pool: &PgPool, user: &User, update_id: DbId) -> AppResult<Deleted> {
    let (_, access) = load_update(pool, user, update_id).await?;
    access.require_member("You cannot delete updates in this project.")?;

    if !UpdateRepo::delete(pool, update_id).await? {
        return Err(CoreError::NotFound("Update not found.".into()).into());
    }

    tracing::info!(update_id, user_id = user.id, "Update deleted");
    Ok(Deleted::new(update_id))
}
