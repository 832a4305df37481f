use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, handed to every action.
    pub pool: clientpulse_db::DbPool,
    /// Server configuration (identity settings, public base URL).
    pub config: Arc<ServerConfig>,
}
