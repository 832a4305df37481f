//! Authentication and authorization extractors.
//!
//! - [`auth::Identity`] -- verified identity-token claims (no database access).
//! - [`auth::CurrentUser`] -- the caller's user row, created on first sight.
//! - [`auth::KnownUser`] -- the caller's user row, lookup only.
//! - [`rbac::RequireStaff`] -- requires the identity-provider `staff` role.

pub mod auth;
pub mod rbac;
