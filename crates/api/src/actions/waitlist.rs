//! Waitlist signups (public) and their staff-side administration.

use std::collections::HashMap;

use clientpulse_core::error::CoreError;
use clientpulse_core::search::{clamp_limit, like_pattern};
use clientpulse_core::types::DbId;
use clientpulse_core::validation::{normalize_email, validate_input};
use clientpulse_core::waitlist::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use clientpulse_db::models::waitlist::{
    CreateWaitlistEntry, UpdateWaitlistStatus, WaitlistEntry, WaitlistEntryDetail, WaitlistFilter,
    WaitlistListItem,
};
use clientpulse_db::repositories::waitlist_repo::Submission;
use clientpulse_db::repositories::WaitlistRepo;
use sqlx::PgPool;

use super::trimmed;
use crate::error::AppResult;
use crate::middleware::auth::Identity;

/// Record a signup. A repeated email updates the existing entry instead of
/// creating a second one.
pub async fn create_waitlist_entry(
    pool: &PgPool,
    input: CreateWaitlistEntry,
) -> AppResult<(WaitlistEntry, Submission)> {
    validate_input(&input)?;

    let input = CreateWaitlistEntry {
        email: normalize_email(&input.email),
        full_name: trimmed(input.full_name.as_deref()),
        company: trimmed(input.company.as_deref()),
        goals: trimmed(input.goals.as_deref()),
        source: trimmed(input.source.as_deref()),
        notes: trimmed(input.notes.as_deref()),
        metadata: input.metadata,
    };
    let (entry, submission) = WaitlistRepo::submit(pool, &input).await?;

    tracing::info!(entry_id = entry.id, ?submission, "Waitlist submission recorded");
    Ok((entry, submission))
}

/// Newest first, each with its most recent event.
pub async fn list_waitlist_entries(
    pool: &PgPool,
    staff: &Identity,
    filter: WaitlistFilter,
) -> AppResult<Vec<WaitlistListItem>> {
    validate_input(&filter)?;

    let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let pattern = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(like_pattern);
    let entries =
        WaitlistRepo::list(pool, filter.status.as_deref(), pattern.as_deref(), limit).await?;

    let ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
    let mut latest: HashMap<DbId, _> = WaitlistRepo::latest_events(pool, &ids)
        .await?
        .into_iter()
        .map(|event| (event.entry_id, event))
        .collect();

    tracing::debug!(staff = %staff.external_id, count = entries.len(), "Listed waitlist");
    Ok(entries
        .into_iter()
        .map(|entry| WaitlistListItem {
            latest_event: latest.remove(&entry.id),
            entry,
        })
        .collect())
}

/// Move an entry to a new status and log the transition.
pub async fn update_waitlist_status(
    pool: &PgPool,
    staff: &Identity,
    entry_id: DbId,
    input: UpdateWaitlistStatus,
) -> AppResult<WaitlistEntry> {
    validate_input(&input)?;

    let notes = trimmed(input.notes.as_deref());
    let entry = WaitlistRepo::update_status(pool, entry_id, &input.status, notes.as_deref())
        .await?
        .ok_or_else(|| CoreError::NotFound("Waitlist entry not found.".into()))?;

    tracing::info!(
        entry_id,
        status = %entry.status,
        staff = %staff.external_id,
        "Waitlist status changed"
    );
    Ok(entry)
}

pub async fn get_waitlist_entry(
    pool: &PgPool,
    entry_id: DbId,
) -> AppResult<WaitlistEntryDetail> {
    let entry = WaitlistRepo::find_by_id(pool, entry_id)
        .await?
        .ok_or_else(|| CoreError::NotFound("Waitlist entry not found.".into()))?;
    let events = WaitlistRepo::list_events(pool, entry_id).await?;
    Ok(WaitlistEntryDetail { entry, events })
}
