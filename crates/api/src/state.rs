use std::sync::Arc;

use lims_core::privileges::PrivilegeCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lims_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Privilege prerequisite catalog, loaded from `privilege_dependencies`
    /// at startup. The catalog is static data; the server restarts when it
    /// changes.
    pub catalog: Arc<PrivilegeCatalog>,
}
