//! Route definitions for the `/privileges` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::privileges;
use crate::state::AppState;

/// Routes mounted at `/privileges`.
///
/// ```text
/// GET    /               -> list_privileges
/// GET    /dependencies   -> list_dependencies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(privileges::list_privileges))
        .route("/dependencies", get(privileges::list_dependencies))
}
