pub mod health;
pub mod privileges;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /privileges                 list catalog (GET)
/// /privileges/dependencies    list prerequisite edges (GET)
///
/// /roles                      list (GET), create (POST)
/// /roles/{id}                 get (GET), update (PUT), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/privileges", privileges::router())
        .nest("/roles", roles::router())
}
