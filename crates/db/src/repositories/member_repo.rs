//! Repository for the `project_members` table.

use clientpulse_core::roles::ROLE_OWNER;
use clientpulse_core::types::DbId;
use sqlx::PgPool;

use crate::models::member::{MemberListItem, ProjectMember};
use crate::models::user::UserSummary;

const COLUMNS: &str = "id, project_id, user_id, role, created_at, updated_at";

/// Provides membership lookups and mutations. The owner never has a row.
pub struct MemberRepo;

impl MemberRepo {
    /// The stored role of `user_id` on `project_id`, if any.
    pub async fn find_role(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT role FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// The owner rendered as a list entry with the synthesized `OWNER` role.
    pub async fn find_owner_entry(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<MemberListItem>, sqlx::Error> {
        sqlx::query_as::<_, MemberListItem>(
            "SELECT u.id AS user_id, $2 AS role, u.name, u.email
             FROM projects p
             JOIN users u ON u.id = p.owner_id
             WHERE p.id = $1",
        )
        .bind(project_id)
        .bind(ROLE_OWNER)
        .fetch_optional(pool)
        .await
    }

    /// Stored members in join order, with their user profile.
    pub async fn list_with_users(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MemberListItem>, sqlx::Error> {
        sqlx::query_as::<_, MemberListItem>(
            "SELECT m.user_id, m.role, u.name, u.email
             FROM project_members m
             JOIN users u ON u.id = m.user_id
             JOIN projects p ON p.id = m.project_id
             WHERE m.project_id = $1 AND m.user_id <> p.owner_id
             ORDER BY m.created_at ASC, m.id ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Create the membership or overwrite its role.
    pub async fn upsert(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<ProjectMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_members (project_id, user_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_project_members_project_user
             DO UPDATE SET role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Change an existing member's role. Returns `None` if there is no row.
    pub async fn update_role(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<Option<ProjectMember>, sqlx::Error> {
        let query = format!(
            "UPDATE project_members SET role = $3
             WHERE project_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a membership. Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Users matching `pattern` (an escaped `ILIKE` pattern) on email or name
    /// who are neither the owner nor already members, ordered by email.
    pub async fn search_candidates(
        pool: &PgPool,
        project_id: DbId,
        owner_id: DbId,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.name, u.email
             FROM users u
             WHERE (u.email ILIKE $3 OR u.name ILIKE $3)
               AND u.id <> $2
               AND NOT EXISTS (
                   SELECT 1 FROM project_members m
                   WHERE m.project_id = $1 AND m.user_id = u.id
               )
             ORDER BY u.email ASC
             LIMIT $4",
        )
        .bind(project_id)
        .bind(owner_id)
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
