use std::sync::Arc;

use crate::config::ServerConfig;
use crate::controller::VersionController;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: docver_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Document use cases, backed by the same pool.
    pub controller: VersionController,
}

impl AppState {
    pub fn new(pool: docver_db::DbPool, config: ServerConfig) -> Self {
        let controller = VersionController::new(pool.clone());
        Self {
            pool,
            config: Arc::new(config),
            controller,
        }
    }
}
