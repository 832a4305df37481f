//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` input DTOs for creates and patches
//! - Joined projections returned by listing queries

use serde::{Deserialize, Deserializer};

pub mod client;
pub mod member;
pub mod project;
pub mod share_link;
pub mod update;
pub mod user;
pub mod waitlist;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use together with `#[serde(default)]` on `Option<Option<T>>` fields.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim surrounding whitespace before field validation runs.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// [`trimmed`] for optional fields; use with `#[serde(default)]`.
pub fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Signup {
        #[serde(deserialize_with = "trimmed")]
        email: String,
        #[serde(default, deserialize_with = "trimmed_option")]
        backup: Option<String>,
    }

    #[test]
    fn emails_are_trimmed_on_the_way_in() {
        let signup: Signup =
            serde_json::from_value(serde_json::json!({ "email": "  Lead@Example.COM " })).unwrap();
        assert_eq!(signup.email, "Lead@Example.COM");
        assert_eq!(signup.backup, None);

        let signup: Signup = serde_json::from_value(
            serde_json::json!({ "email": "a@b.io", "backup": " c@d.io\t" }),
        )
        .unwrap();
        assert_eq!(signup.backup.as_deref(), Some("c@d.io"));
    }
}
