//! Authentication primitives.
//!
//! - [`jwt`] -- identity-token verification (and issuance for tooling/tests).
//! - [`password`] -- Argon2id hashing for share-link passwords.

pub mod jwt;
pub mod password;
