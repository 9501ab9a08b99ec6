//! Role entity model and DTOs.

use lims_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full role row from the `roles` table.
///
/// Privilege assignments live in the `role_privileges` junction; use
/// [`RoleResponse`] for external-facing output that carries them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Role representation for API responses, including assigned privileges.
#[derive(Debug, Clone, Serialize)]
pub struct RoleResponse {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub description: String,
    /// Closed under the prerequisite relation; sorted ascending.
    pub privilege_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new role.
///
/// `privilege_ids` must already be normalized; the repository persists the
/// set verbatim.
#[derive(Debug, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub code: String,
    pub description: String,
    pub privilege_ids: Vec<DbId>,
}

/// DTO for updating an existing role. All fields are optional; a `None`
/// privilege set leaves the current assignments untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateRole {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub privilege_ids: Option<Vec<DbId>>,
}
