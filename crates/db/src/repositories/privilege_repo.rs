//! Repository for the `privileges` and `privilege_dependencies` tables.

use lims_core::types::DbId;
use sqlx::PgPool;

use crate::models::privilege::{Privilege, PrivilegeDependency};

/// Provides read operations for the privilege catalog.
pub struct PrivilegeRepo;

impl PrivilegeRepo {
    /// List all privileges ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Privilege>, sqlx::Error> {
        sqlx::query_as::<_, Privilege>("SELECT id, name FROM privileges ORDER BY id ASC")
            .fetch_all(pool)
            .await
    }

    /// List all prerequisite edges ordered by dependent ID ascending.
    pub async fn list_dependencies(pool: &PgPool) -> Result<Vec<PrivilegeDependency>, sqlx::Error> {
        sqlx::query_as::<_, PrivilegeDependency>(
            "SELECT dependent_id, prerequisite_id FROM privilege_dependencies
             ORDER BY dependent_id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Ids from `ids` that do not exist in the `privileges` table, sorted
    /// ascending.
    ///
    /// The normalizer is permissive about unknown ids; deciding which ids
    /// are legitimate privileges at all is the server's job, and this is
    /// the membership check it uses.
    pub async fn unknown_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT u.id FROM UNNEST($1::BIGINT[]) AS u(id)
             LEFT JOIN privileges p ON p.id = u.id
             WHERE p.id IS NULL
             ORDER BY u.id ASC",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Load the prerequisite edges as `(dependent, prerequisite)` pairs,
    /// ready to feed `PrivilegeCatalog::from_edges`.
    pub async fn dependency_edges(pool: &PgPool) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        let edges = Self::list_dependencies(pool).await?;
        Ok(edges
            .into_iter()
            .map(|e| (e.dependent_id, e.prerequisite_id))
            .collect())
    }
}
