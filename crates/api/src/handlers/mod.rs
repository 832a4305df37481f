//! HTTP handlers: thin adapters from extractors to [`crate::actions`].

pub mod clients;
pub mod members;
pub mod projects;
pub mod share_links;
pub mod updates;
pub mod users;
pub mod waitlist;
