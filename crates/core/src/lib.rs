//! Domain rules for the ClientPulse service.
//!
//! Everything in this crate is free of I/O: status vocabularies, input
//! limits, role semantics, pagination math, share-slug generation and the
//! shared [`error::CoreError`] taxonomy. The `db` and `api` crates build on
//! top of it.

pub mod client;
pub mod error;
pub mod project;
pub mod roles;
pub mod search;
pub mod share_link;
pub mod types;
pub mod update;
pub mod validation;
pub mod waitlist;
