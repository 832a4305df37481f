//! ClientPulse API server library.
//!
//! Exposes the building blocks (config, state, error handling, the action
//! layer, routes) so integration tests and the binary entrypoint can both
//! access them.

// The OpenAPI document is one large `json!` literal.
#![recursion_limit = "256"]

pub mod actions;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
