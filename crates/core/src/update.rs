//! Update (Markdown post) status vocabulary and tag rules.

use validator::ValidationError;

use crate::validation::error;

pub const STATUS_DRAFT: &str = "DRAFT";
pub const STATUS_PUBLISHED: &str = "PUBLISHED";
pub const STATUS_ARCHIVED: &str = "ARCHIVED";

/// All valid update statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED, STATUS_ARCHIVED];

/// Status applied when a create request omits one.
pub const DEFAULT_STATUS: &str = STATUS_PUBLISHED;

/// Maximum number of tags on a single update (and in a share-link filter).
pub const MAX_TAGS: usize = 20;
/// Maximum length of a single tag.
pub const MAX_TAG_LEN: usize = 50;

/// `validator` hook: status must be one of [`VALID_STATUSES`].
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(error(
            "invalid_status",
            format!("Status must be one of: {}", VALID_STATUSES.join(", ")),
        ))
    }
}

/// `validator` hook for tag lists.
pub fn validate_tags(tags: &Vec<String>) -> Result<(), ValidationError> {
    let normalized = normalize_tags(tags);
    if normalized.len() > MAX_TAGS {
        return Err(error(
            "too_many_tags",
            format!("At most {MAX_TAGS} tags are allowed"),
        ));
    }
    if normalized.iter().any(|t| t.chars().count() > MAX_TAG_LEN) {
        return Err(error(
            "tag_too_long",
            format!("Tags must be at most {MAX_TAG_LEN} characters"),
        ));
    }
    Ok(())
}

/// Trim tags, drop empties and duplicates, keeping first-seen order.
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Superset semantics used by listings and share links: every `required`
/// tag must be present on the update.
pub fn has_all_tags(tags: &[String], required: &[String]) -> bool {
    required.iter().all(|r| tags.contains(r))
}
