//! Repository for the `share_links` table.

use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::share_link::{ShareLink, ShareLinkChanges};

const COLUMNS: &str =
    "id, project_id, slug, enabled, visibility, tag_filter, password_hash, created_at, updated_at";

/// Provides CRUD and slug lookup for share links.
pub struct ShareLinkRepo;

impl ShareLinkRepo {
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        slug: &str,
        visibility: &str,
        tag_filter: &[String],
        password_hash: Option<&str>,
    ) -> Result<ShareLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO share_links (project_id, slug, visibility, tag_filter, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShareLink>(&query)
            .bind(project_id)
            .bind(slug)
            .bind(visibility)
            .bind(tag_filter)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ShareLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM share_links WHERE id = $1");
        sqlx::query_as::<_, ShareLink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<ShareLink>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM share_links WHERE slug = $1");
        sqlx::query_as::<_, ShareLink>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// All links of a project, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ShareLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM share_links WHERE project_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ShareLink>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply resolved changes. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &ShareLinkChanges,
    ) -> Result<Option<ShareLink>, sqlx::Error> {
        let query = format!(
            "UPDATE share_links SET
                slug = COALESCE($2, slug),
                enabled = COALESCE($3, enabled),
                visibility = COALESCE($4, visibility),
                tag_filter = COALESCE($5, tag_filter),
                password_hash = CASE WHEN $6 THEN $7 ELSE password_hash END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShareLink>(&query)
            .bind(id)
            .bind(&changes.slug)
            .bind(changes.enabled)
            .bind(&changes.visibility)
            .bind(&changes.tag_filter)
            .bind(changes.password_hash.is_some())
            .bind(changes.password_hash.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM share_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
