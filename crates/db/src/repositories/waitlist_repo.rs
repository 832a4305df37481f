//! Repository for the `waitlist_entries` and `waitlist_events` tables.

use chrono::Utc;
use clientpulse_core::types::DbId;
use clientpulse_core::waitlist::{
    next_converted_at, status_change_payload, EVENT_COMMUNICATION, EVENT_NOTE,
    EVENT_STATUS_CHANGE, REASON_RESUBMITTED,
};
use sqlx::{FromRow, PgConnection, PgPool};

use crate::models::waitlist::{CreateWaitlistEntry, WaitlistEntry, WaitlistEvent};

const COLUMNS: &str = "id, email, full_name, company, goals, source, notes, metadata, status, \
                       converted_at, created_at, updated_at";

const EVENT_COLUMNS: &str = "id, entry_id, type, notes, payload, created_at";

/// Whether an upsert created a fresh entry or merged into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Created,
    Resubmitted,
}

#[derive(FromRow)]
struct UpsertedEntry {
    #[sqlx(flatten)]
    entry: WaitlistEntry,
    inserted: bool,
}

/// Provides signup upserts, status transitions and the event log.
pub struct WaitlistRepo;

impl WaitlistRepo {
    /// Insert a signup or merge it into the entry with the same email.
    ///
    /// A new entry starts `PENDING` and logs a `COMMUNICATION` event; a
    /// resubmission overwrites the provided fields, keeps the status and logs
    /// a `NOTE` event. `input.email` must already be normalized.
    pub async fn submit(
        pool: &PgPool,
        input: &CreateWaitlistEntry,
    ) -> Result<(WaitlistEntry, Submission), sqlx::Error> {
        let mut tx = pool.begin().await?;

        // `xmax = 0` only holds for a row inserted by this statement.
        let query = format!(
            "INSERT INTO waitlist_entries (email, full_name, company, goals, source, notes, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             ON CONFLICT ON CONSTRAINT uq_waitlist_entries_email DO UPDATE SET
                full_name = COALESCE(EXCLUDED.full_name, waitlist_entries.full_name),
                company = COALESCE(EXCLUDED.company, waitlist_entries.company),
                goals = COALESCE(EXCLUDED.goals, waitlist_entries.goals),
                source = COALESCE(EXCLUDED.source, waitlist_entries.source),
                notes = COALESCE(EXCLUDED.notes, waitlist_entries.notes),
                metadata = COALESCE(EXCLUDED.metadata, waitlist_entries.metadata)
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let upserted = sqlx::query_as::<_, UpsertedEntry>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(&input.company)
            .bind(&input.goals)
            .bind(&input.source)
            .bind(&input.notes)
            .bind(&input.metadata)
            .fetch_one(&mut *tx)
            .await?;

        let submission = if upserted.inserted {
            let payload = serde_json::json!({ "source": input.source });
            Self::append_event(&mut *tx, upserted.entry.id, EVENT_COMMUNICATION, None, &payload)
                .await?;
            Submission::Created
        } else {
            let payload = serde_json::json!({
                "reason": REASON_RESUBMITTED,
                "source": upserted.entry.source,
            });
            Self::append_event(
                &mut *tx,
                upserted.entry.id,
                EVENT_NOTE,
                input.notes.as_deref(),
                &payload,
            )
            .await?;
            Submission::Resubmitted
        };

        tx.commit().await?;
        Ok((upserted.entry, submission))
    }

    /// Move an entry to `status`, keeping `converted_at` in lockstep and
    /// logging a `STATUS_CHANGE` event. Non-empty `notes` replace the entry's
    /// notes. Returns `None` if the entry is missing.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM waitlist_entries WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let converted_at =
            next_converted_at(&current.status, status, current.converted_at, Utc::now());

        let query = format!(
            "UPDATE waitlist_entries SET status = $2, converted_at = $3, notes = COALESCE($4, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .bind(status)
            .bind(converted_at)
            .bind(notes)
            .fetch_one(&mut *tx)
            .await?;

        let payload = status_change_payload(&current.status, status);
        Self::append_event(&mut *tx, id, EVENT_STATUS_CHANGE, notes, &payload).await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries WHERE id = $1");
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Entries newest first, optionally filtered by status and an escaped
    /// `ILIKE` pattern over email, full name and company.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        pattern: Option<&str>,
        limit: i64,
    ) -> Result<Vec<WaitlistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waitlist_entries
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL
                    OR email ILIKE $2 OR full_name ILIKE $2 OR company ILIKE $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(status)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// The single most recent event of each entry in `entry_ids`.
    pub async fn latest_events(
        pool: &PgPool,
        entry_ids: &[DbId],
    ) -> Result<Vec<WaitlistEvent>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (entry_id) {EVENT_COLUMNS} FROM waitlist_events
             WHERE entry_id = ANY($1)
             ORDER BY entry_id, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, WaitlistEvent>(&query)
            .bind(entry_ids)
            .fetch_all(pool)
            .await
    }

    /// Full event history of one entry, newest first.
    pub async fn list_events(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Vec<WaitlistEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM waitlist_events
             WHERE entry_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, WaitlistEvent>(&query)
            .bind(entry_id)
            .fetch_all(pool)
            .await
    }

    async fn append_event(
        conn: &mut PgConnection,
        entry_id: DbId,
        event_type: &str,
        notes: Option<&str>,
        payload: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO waitlist_events (entry_id, type, notes, payload)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(entry_id)
        .bind(event_type)
        .bind(notes)
        .bind(payload)
        .execute(conn)
        .await?;
        Ok(())
    }
}
