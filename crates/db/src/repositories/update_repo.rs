//! Repository for the `updates` table.

use clientpulse_core::types::DbId;
use clientpulse_core::update::DEFAULT_STATUS;
use sqlx::PgPool;

use crate::models::update::{CreateUpdate, EditUpdate, Update, UpdateFilter};

const COLUMNS: &str =
    "id, project_id, title, body_md, status, tags, created_by, created_at, updated_at";

/// Shared `WHERE` clause for listings: `$1` project, `$2` status, `$3` tags.
///
/// `@>` gives superset semantics: every requested tag must be present.
const FILTER: &str = "project_id = $1 AND ($2::text IS NULL OR status = $2) AND tags @> $3::text[]";

/// Provides CRUD and filtered listing for updates.
pub struct UpdateRepo;

impl UpdateRepo {
    /// Insert an update. Tags are expected to be normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        created_by: DbId,
        input: &CreateUpdate,
    ) -> Result<Update, sqlx::Error> {
        let query = format!(
            "INSERT INTO updates (project_id, title, body_md, status, tags, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Update>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.body_md)
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(&input.tags)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Update>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM updates WHERE id = $1");
        sqlx::query_as::<_, Update>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a project's updates, newest first.
    pub async fn list(
        pool: &PgPool,
        project_id: DbId,
        filter: &UpdateFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Update>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM updates WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Update>(&query)
            .bind(project_id)
            .bind(&filter.status)
            .bind(&filter.tags)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of updates matching `filter`, ignoring pagination.
    pub async fn count(
        pool: &PgPool,
        project_id: DbId,
        filter: &UpdateFilter,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM updates WHERE {FILTER}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(project_id)
            .bind(&filter.status)
            .bind(&filter.tags)
            .fetch_one(pool)
            .await
    }

    /// Apply an edit. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &EditUpdate,
    ) -> Result<Option<Update>, sqlx::Error> {
        let query = format!(
            "UPDATE updates SET
                title = COALESCE($2, title),
                body_md = COALESCE($3, body_md),
                tags = COALESCE($4, tags),
                status = COALESCE($5, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Update>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body_md)
            .bind(&input.tags)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM updates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
