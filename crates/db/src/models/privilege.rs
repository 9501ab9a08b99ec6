//! Privilege entity models.
//!
//! The catalog is seeded by migration and read-only at runtime, so there
//! are no create/update DTOs here.

use lims_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A privilege row from the `privileges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Privilege {
    pub id: DbId,
    pub name: String,
}

/// A prerequisite edge from the `privilege_dependencies` table.
///
/// Holding `dependent_id` requires also holding `prerequisite_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrivilegeDependency {
    pub dependent_id: DbId,
    pub prerequisite_id: DbId,
}
