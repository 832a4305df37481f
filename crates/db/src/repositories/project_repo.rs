//! Repository for the `projects` table.

use clientpulse_core::roles::{ROLE_EDITOR, ROLE_OWNER};
use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{
    CreateProject, Project, ProjectListItem, ProjectSummary, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_archived, owner_id, created_at, updated_at";

/// Provides CRUD, archival and ownership operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, name, description FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Projects the user owns or belongs to, newest first, tagged with the
    /// user's effective role.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ProjectListItem>, sqlx::Error> {
        sqlx::query_as::<_, ProjectListItem>(
            "SELECT p.id, p.name, p.description, p.is_archived, p.owner_id,
                    CASE WHEN p.owner_id = $1 THEN $2 ELSE m.role END AS role,
                    p.created_at, p.updated_at
             FROM projects p
             LEFT JOIN project_members m ON m.project_id = p.id AND m.user_id = $1
             WHERE p.owner_id = $1 OR m.user_id IS NOT NULL
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(user_id)
        .bind(ROLE_OWNER)
        .fetch_all(pool)
        .await
    }

    /// Apply a patch. `description: Some(None)` clears the description.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                is_archived = COALESCE($5, is_archived)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.is_archived)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_archived(
        pool: &PgPool,
        id: DbId,
        archived: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET is_archived = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(archived)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project and everything hanging off it in one
    /// transaction. Returns `true` if the project row was removed.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM updates WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM project_members WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM share_links WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM client_project_access WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM client_tags WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hand the project to `new_owner_id` atomically.
    ///
    /// The previous owner becomes an `EDITOR` member and the new owner's
    /// membership row is removed, since ownership is implicit. Returns `None`
    /// and changes nothing when the project is archived or the caller's view
    /// of owner and membership has gone stale.
    pub async fn transfer_ownership(
        pool: &PgPool,
        id: DbId,
        previous_owner_id: DbId,
        new_owner_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Preconditions are re-checked under the row lock.
        let query = format!(
            "UPDATE projects SET owner_id = $2
             WHERE id = $1 AND owner_id = $3 AND NOT is_archived
               AND EXISTS (
                   SELECT 1 FROM project_members WHERE project_id = $1 AND user_id = $2
               )
             RETURNING {COLUMNS}"
        );
        let Some(project) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(new_owner_id)
            .bind(previous_owner_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO project_members (project_id, user_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_project_members_project_user
             DO UPDATE SET role = EXCLUDED.role",
        )
        .bind(id)
        .bind(previous_owner_id)
        .bind(ROLE_EDITOR)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
            .bind(id)
            .bind(new_owner_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }
}
