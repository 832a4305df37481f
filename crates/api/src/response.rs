//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope; failures use
//! `{ "error": { "code", "message", "details"? } }` (see [`crate::error`]).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
