//! Repository for client contacts, their project access and access tags.

use clientpulse_core::client::{ROLE_CLIENT, STATUS_PENDING};
use clientpulse_core::types::DbId;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::client::{ClientAccessRow, ClientCandidate, ClientTag};

/// Access rows joined with their contact and inviter.
const ACCESS_SELECT: &str = "SELECT a.id AS access_id, a.project_id, a.client_id,
        c.email, c.name, c.avatar_url, a.role, a.status, a.invite_token,
        a.invited_by_id, u.name AS invited_by_name, u.email AS invited_by_email,
        a.last_viewed_at, a.created_at
     FROM client_project_access a
     JOIN client_contacts c ON c.id = a.client_id
     LEFT JOIN users u ON u.id = a.invited_by_id";

/// Input for granting a contact access to a project.
#[derive(Debug, Clone)]
pub struct NewClientAccess<'a> {
    pub project_id: DbId,
    pub owner_id: DbId,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub tags: &'a [String],
    pub invite_token: &'a str,
}

#[derive(FromRow)]
struct AccessTag {
    access_id: DbId,
    id: DbId,
    label: String,
    color: Option<String>,
}

/// Provides the owner-scoped client model.
pub struct ClientRepo;

impl ClientRepo {
    /// Find-or-create the owner's contact and grant it `PENDING` access.
    ///
    /// Returns `None` (and writes nothing) if the contact already has access
    /// to the project.
    pub async fn create_access(
        pool: &PgPool,
        input: &NewClientAccess<'_>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let client_id: DbId = sqlx::query_scalar(
            "INSERT INTO client_contacts (owner_id, email, name)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_client_contacts_owner_email
             DO UPDATE SET name = COALESCE(client_contacts.name, EXCLUDED.name)
             RETURNING id",
        )
        .bind(input.owner_id)
        .bind(input.email)
        .bind(input.name)
        .fetch_one(&mut *tx)
        .await?;

        let access_id: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO client_project_access
                (project_id, client_id, invited_by_id, role, status, invite_token)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_client_project_access_project_client DO NOTHING
             RETURNING id",
        )
        .bind(input.project_id)
        .bind(client_id)
        .bind(input.owner_id)
        .bind(ROLE_CLIENT)
        .bind(STATUS_PENDING)
        .bind(input.invite_token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(access_id) = access_id else {
            tx.rollback().await?;
            return Ok(None);
        };

        let tags = Self::ensure_tags(&mut *tx, input.project_id, input.tags).await?;
        Self::assign_tags(&mut *tx, access_id, &tags).await?;

        tx.commit().await?;
        Ok(Some(access_id))
    }

    pub async fn find_access(
        pool: &PgPool,
        access_id: DbId,
    ) -> Result<Option<ClientAccessRow>, sqlx::Error> {
        let query = format!("{ACCESS_SELECT} WHERE a.id = $1");
        sqlx::query_as::<_, ClientAccessRow>(&query)
            .bind(access_id)
            .fetch_optional(pool)
            .await
    }

    /// Every access on a project in creation order.
    pub async fn list_access(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ClientAccessRow>, sqlx::Error> {
        let query = format!(
            "{ACCESS_SELECT} WHERE a.project_id = $1 ORDER BY a.created_at ASC, a.id ASC"
        );
        sqlx::query_as::<_, ClientAccessRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Tags assigned to each access in `access_ids`, as `(access_id, tag)` pairs.
    pub async fn tags_for_access(
        pool: &PgPool,
        access_ids: &[DbId],
    ) -> Result<Vec<(DbId, ClientTag)>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AccessTag>(
            "SELECT ta.access_id, t.id, t.label, t.color
             FROM client_tag_assignments ta
             JOIN client_tags t ON t.id = ta.tag_id
             WHERE ta.access_id = ANY($1)
             ORDER BY t.label ASC",
        )
        .bind(access_ids)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.access_id,
                    ClientTag {
                        id: r.id,
                        label: r.label,
                        color: r.color,
                    },
                )
            })
            .collect())
    }

    /// Every tag defined on a project, alphabetically.
    pub async fn list_tags(pool: &PgPool, project_id: DbId) -> Result<Vec<ClientTag>, sqlx::Error> {
        sqlx::query_as::<_, ClientTag>(
            "SELECT id, label, color FROM client_tags WHERE project_id = $1 ORDER BY label ASC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Change an access's status and/or replace its tag set atomically.
    pub async fn update_access(
        pool: &PgPool,
        project_id: DbId,
        access_id: DbId,
        status: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(status) = status {
            sqlx::query("UPDATE client_project_access SET status = $2 WHERE id = $1")
                .bind(access_id)
                .bind(status)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(labels) = tags {
            sqlx::query("DELETE FROM client_tag_assignments WHERE access_id = $1")
                .bind(access_id)
                .execute(&mut *tx)
                .await?;
            let tags = Self::ensure_tags(&mut *tx, project_id, labels).await?;
            Self::assign_tags(&mut *tx, access_id, &tags).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn remove_access(pool: &PgPool, access_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM client_project_access WHERE id = $1")
            .bind(access_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The owner's contacts matching `pattern` on email or name, flagged
    /// when they already have access to `project_id`.
    pub async fn search_candidates(
        pool: &PgPool,
        owner_id: DbId,
        project_id: DbId,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<ClientCandidate>, sqlx::Error> {
        sqlx::query_as::<_, ClientCandidate>(
            "SELECT c.id AS client_id, c.email, c.name,
                    EXISTS (
                        SELECT 1 FROM client_project_access a
                        WHERE a.client_id = c.id AND a.project_id = $2
                    ) AS already_assigned
             FROM client_contacts c
             WHERE c.owner_id = $1 AND (c.email ILIKE $3 OR c.name ILIKE $3)
             ORDER BY c.name ASC NULLS LAST, c.email ASC
             LIMIT $4",
        )
        .bind(owner_id)
        .bind(project_id)
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Create any missing project tags for `labels` and return all of them.
    async fn ensure_tags(
        conn: &mut PgConnection,
        project_id: DbId,
        labels: &[String],
    ) -> Result<Vec<ClientTag>, sqlx::Error> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query(
            "INSERT INTO client_tags (project_id, label)
             SELECT $1, label FROM UNNEST($2::text[]) AS label
             ON CONFLICT ON CONSTRAINT uq_client_tags_project_label DO NOTHING",
        )
        .bind(project_id)
        .bind(labels)
        .execute(&mut *conn)
        .await?;

        sqlx::query_as::<_, ClientTag>(
            "SELECT id, label, color FROM client_tags
             WHERE project_id = $1 AND label = ANY($2)
             ORDER BY label ASC",
        )
        .bind(project_id)
        .bind(labels)
        .fetch_all(&mut *conn)
        .await
    }

    async fn assign_tags(
        conn: &mut PgConnection,
        access_id: DbId,
        tags: &[ClientTag],
    ) -> Result<(), sqlx::Error> {
        if tags.is_empty() {
            return Ok(());
        }
        let tag_ids: Vec<DbId> = tags.iter().map(|t| t.id).collect();
        sqlx::query(
            "INSERT INTO client_tag_assignments (access_id, tag_id)
             SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS tag_id
             ON CONFLICT DO NOTHING",
        )
        .bind(access_id)
        .bind(&tag_ids)
        .execute(conn)
        .await?;
        Ok(())
    }
}
