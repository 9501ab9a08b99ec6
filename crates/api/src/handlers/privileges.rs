//! Handlers for the `/privileges` resource.
//!
//! The privilege catalog is seeded by migration and read-only at runtime,
//! so this resource only lists.

use axum::extract::State;
use axum::Json;
use lims_db::models::privilege::{Privilege, PrivilegeDependency};
use lims_db::repositories::PrivilegeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/privileges
///
/// List the full privilege catalog (ids and display names), used by
/// clients to render selection options.
pub async fn list_privileges(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Privilege>>>> {
    let privileges = PrivilegeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: privileges }))
}

/// GET /api/v1/privileges/dependencies
///
/// List the prerequisite edges, for clients that normalize locally before
/// submitting.
pub async fn list_dependencies(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PrivilegeDependency>>>> {
    let dependencies = PrivilegeRepo::list_dependencies(&state.pool).await?;
    Ok(Json(DataResponse { data: dependencies }))
}
