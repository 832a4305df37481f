//! Share-link visibility vocabulary, slug rules and slug generation.
//!
//! A share link exposes a filtered, read-only view of one project's updates
//! at `/share/{slug}`. Slugs are either caller-chosen (validated against
//! [`SLUG_PATTERN`]) or generated as random lowercase hex.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use validator::ValidationError;

use crate::validation::error;

pub const VISIBILITY_ALL: &str = "ALL";
pub const VISIBILITY_PUBLISHED_ONLY: &str = "PUBLISHED_ONLY";

/// All valid visibility values.
pub const VALID_VISIBILITIES: &[&str] = &[VISIBILITY_ALL, VISIBILITY_PUBLISHED_ONLY];

/// Length of a generated slug in hex characters.
pub const GENERATED_SLUG_LEN: usize = 32;

/// Accepted shape of a caller-chosen slug.
pub const SLUG_PATTERN: &str = "^[a-z0-9](?:[a-z0-9-]{1,62})[a-z0-9]$";

/// Minimum length of a share-link password.
pub const MIN_PASSWORD_LEN: usize = 8;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("slug pattern is valid"));

/// `validator` hook: visibility must be one of [`VALID_VISIBILITIES`].
pub fn validate_visibility(visibility: &str) -> Result<(), ValidationError> {
    if VALID_VISIBILITIES.contains(&visibility) {
        Ok(())
    } else {
        Err(error(
            "invalid_visibility",
            format!("Visibility must be one of: {}", VALID_VISIBILITIES.join(", ")),
        ))
    }
}

/// `validator` hook: 3-64 chars of `a-z`, `0-9` and inner hyphens.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        Err(error(
            "invalid_slug",
            "Slug must be 3-64 lowercase letters, digits or hyphens",
        ))
    }
}

/// `validator` hook for share-link passwords.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(error(
            "password_too_short",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
        ));
    }
    Ok(())
}

/// Generate a random lowercase-hex slug of [`GENERATED_SLUG_LEN`] chars.
pub fn generate_slug() -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::rng();
    (0..GENERATED_SLUG_LEN)
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect()
}

/// Public URL at which a share link is reachable.
pub fn share_url(base_url: &str, slug: &str) -> String {
    format!("{}/share/{slug}", base_url.trim_end_matches('/'))
}

/// Whether a share link with `visibility` restricts results to published updates.
pub fn published_only(visibility: &str) -> bool {
    visibility == VISIBILITY_PUBLISHED_ONLY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_slug_is_hex_and_valid() {
        let slug = generate_slug();
        assert_eq!(slug.len(), GENERATED_SLUG_LEN);
        assert!(slug.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn generated_slugs_differ() {
        assert_ne!(generate_slug(), generate_slug());
    }

    #[test]
    fn slug_rules() {
        assert!(validate_slug("client-demo").is_ok());
        assert!(validate_slug("abc").is_ok());
        assert!(validate_slug("ab").is_err());
        assert!(validate_slug("-abc").is_err());
        assert!(validate_slug("abc-").is_err());
        assert!(validate_slug("Has-Caps").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug(&"a".repeat(65)).is_err());
        assert!(validate_slug(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn visibility_vocabulary() {
        assert!(validate_visibility("ALL").is_ok());
        assert!(validate_visibility("PUBLISHED_ONLY").is_ok());
        assert!(validate_visibility("PRIVATE").is_err());
        assert!(published_only("PUBLISHED_ONLY"));
        assert!(!published_only("ALL"));
    }

    #[test]
    fn share_url_strips_trailing_slash() {
        assert_eq!(
            share_url("https://example.com/", "abc"),
            "https://example.com/share/abc"
        );
    }

    #[test]
    fn short_password_rejected() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
    }
}
