//! Handlers for the `/roles` resource.
//!
//! The server is the ultimate owner of the role invariant: every create and
//! update runs the submitted fields through [`RoleDraft::validate`], which
//! normalizes the privilege set against the catalog, regardless of whether
//! the client already did.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lims_core::codes::derive_role_code;
use lims_core::error::CoreError;
use lims_core::roles::{FieldErrors, RoleDraft, RoleSubmission};
use lims_core::types::DbId;
use lims_db::models::role::{CreateRole, Role, RoleResponse, UpdateRole};
use lims_db::repositories::{PrivilegeRepo, RoleRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /roles`.
///
/// `code` is optional; when omitted it is derived from `name`. A missing or
/// `null` privilege list is treated as an empty selection.
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub code: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub privilege_ids: Option<Vec<DbId>>,
}

/// Request body for `PUT /roles/{id}`. All fields are optional; omitted
/// fields keep their current values.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub privilege_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/roles
///
/// Create a role. Validates field rules, normalizes the privilege set,
/// rejects ids that are not in the privilege table, and returns the
/// created role with 201 Created. A duplicate code maps to 409 (pre-checked
/// here; the `uq_roles_code` constraint backstops races).
pub async fn create_role(
    State(state): State<AppState>,
    Json(input): Json<CreateRoleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RoleResponse>>)> {
    let draft = RoleDraft {
        code: input
            .code
            .unwrap_or_else(|| derive_role_code(&input.name)),
        name: input.name,
        description: input.description,
        privilege_ids: input.privilege_ids.unwrap_or_default(),
    };

    let submission = draft
        .validate(&state.catalog)
        .map_err(AppError::FieldValidation)?;
    ensure_known_privileges(&state, &submission.privilege_ids).await?;

    if RoleRepo::find_by_code(&state.pool, &submission.code)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Role code '{}' already exists",
            submission.code
        ))));
    }

    let role = RoleRepo::create(&state.pool, &to_create_dto(&submission)).await?;
    let response = role_to_response(&state, role).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/roles
///
/// List all roles with their privilege assignments.
pub async fn list_roles(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RoleResponse>>>> {
    let roles = RoleRepo::list(&state.pool).await?;

    // Pre-fetch all assignments to avoid N+1 queries.
    let mut by_role: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (role_id, privilege_id) in RoleRepo::list_privilege_assignments(&state.pool).await? {
        by_role.entry(role_id).or_default().push(privilege_id);
    }

    let responses: Vec<RoleResponse> = roles
        .into_iter()
        .map(|role| {
            let privilege_ids = by_role.remove(&role.id).unwrap_or_default();
            build_role_response(role, privilege_ids)
        })
        .collect();

    Ok(Json(DataResponse { data: responses }))
}

/// GET /api/v1/roles/{id}
///
/// Get a single role by ID.
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleResponse>>> {
    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;

    let response = role_to_response(&state, role).await?;
    Ok(Json(DataResponse { data: response }))
}

/// PUT /api/v1/roles/{id}
///
/// Update a role. The submitted fields are merged over the current row and
/// the merged draft is re-validated, so the persisted privilege set is
/// always normalized even when the request only changed the name.
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<RoleResponse>>> {
    let current = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    let current_ids = RoleRepo::privilege_ids_for(&state.pool, id).await?;

    let draft = RoleDraft {
        name: input.name.unwrap_or(current.name),
        code: input.code.unwrap_or(current.code),
        description: input.description.unwrap_or(current.description),
        privilege_ids: input.privilege_ids.unwrap_or(current_ids),
    };

    let submission = draft
        .validate(&state.catalog)
        .map_err(AppError::FieldValidation)?;
    ensure_known_privileges(&state, &submission.privilege_ids).await?;

    let update_dto = UpdateRole {
        name: Some(submission.name),
        code: Some(submission.code),
        description: Some(submission.description),
        privilege_ids: Some(submission.privilege_ids),
    };

    let role = RoleRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;

    let response = role_to_response(&state, role).await?;
    Ok(Json(DataResponse { data: response }))
}

/// DELETE /api/v1/roles/{id}
///
/// Delete a role and its assignments. Returns 204 No Content.
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if RoleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Role", id }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject privilege ids that are not in the `privileges` table.
///
/// The normalizer deliberately passes unknown ids through; legitimacy is
/// decided here, against the database, and reported field-scoped like any
/// other draft problem.
async fn ensure_known_privileges(state: &AppState, ids: &[DbId]) -> AppResult<()> {
    let unknown = PrivilegeRepo::unknown_ids(&state.pool, ids).await?;
    if unknown.is_empty() {
        return Ok(());
    }

    let list = unknown
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let mut errors = FieldErrors::new();
    errors.insert("privilege_ids", format!("Unknown privilege ids: {list}"));
    Err(AppError::FieldValidation(errors))
}

fn to_create_dto(submission: &RoleSubmission) -> CreateRole {
    CreateRole {
        name: submission.name.clone(),
        code: submission.code.clone(),
        description: submission.description.clone(),
        privilege_ids: submission.privilege_ids.clone(),
    }
}

/// Convert a [`Role`] row into a [`RoleResponse`] by fetching its
/// privilege assignments.
async fn role_to_response(state: &AppState, role: Role) -> AppResult<RoleResponse> {
    let privilege_ids = RoleRepo::privilege_ids_for(&state.pool, role.id).await?;
    Ok(build_role_response(role, privilege_ids))
}

fn build_role_response(role: Role, privilege_ids: Vec<DbId>) -> RoleResponse {
    RoleResponse {
        id: role.id,
        name: role.name,
        code: role.code,
        description: role.description,
        privilege_ids,
        created_at: role.created_at,
        updated_at: role.updated_at,
    }
}
