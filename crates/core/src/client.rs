//! Client-contact vocabulary (owner-scoped collaborator list).
//!
//! Clients are a parallel collaborator model to project membership: each
//! owner keeps an address book of contacts and grants them per-project
//! access that moves through [`VALID_STATUSES`].

use validator::ValidationError;

use crate::validation::error;

pub const ROLE_CLIENT: &str = "CLIENT";
pub const ROLE_INTERNAL: &str = "INTERNAL";

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_INACTIVE: &str = "INACTIVE";
pub const STATUS_REVOKED: &str = "REVOKED";

/// All valid client access statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_ACTIVE,
    STATUS_INACTIVE,
    STATUS_REVOKED,
];

/// Maximum number of tags on a single client access.
pub const MAX_CLIENT_TAGS: usize = 8;

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

/// `validator` hook: at most [`MAX_CLIENT_TAGS`] non-blank labels.
pub fn validate_tag_labels(labels: &Vec<String>) -> Result<(), ValidationError> {
    if labels.len() > MAX_CLIENT_TAGS {
        return Err(error(
            "too_many_tags",
            format!("At most {MAX_CLIENT_TAGS} tags are allowed"),
        ));
    }
    if labels.iter().any(|l| l.trim().is_empty()) {
        return Err(error("blank_tag", "Tags must not be blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_vocabulary() {
        assert!(validate_status("REVOKED").is_ok());
        assert!(validate_status("DELETED").is_err());
    }

    #[test]
    fn tag_labels_bounded() {
        let nine: Vec<String> = (0..9).map(|i| format!("t{i}")).collect();
        assert!(validate_tag_labels(&nine).is_err());
        assert!(validate_tag_labels(&vec!["vip".into(), " ".into()]).is_err());
        assert!(validate_tag_labels(&vec!["vip".into()]).is_ok());
    }
}
