//! Repository for the `roles` table and its `role_privileges` junction.
//!
//! Role writes touch two tables; every write happens inside a transaction
//! so a role whose privilege set is missing or half-written is never
//! visible to readers.

use lims_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::role::{CreateRole, Role, UpdateRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, description, created_at, updated_at";

/// Provides CRUD operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role and its privilege assignments, returning the
    /// created row.
    pub async fn create(pool: &PgPool, input: &CreateRole) -> Result<Role, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO roles (name, code, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let role = sqlx::query_as::<_, Role>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_privileges(&mut tx, role.id, &input.privilege_ids).await?;

        tx.commit().await?;
        Ok(role)
    }

    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by code (case-sensitive).
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE code = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Privilege IDs assigned to a role, sorted ascending.
    pub async fn privilege_ids_for(pool: &PgPool, role_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT privilege_id FROM role_privileges
             WHERE role_id = $1 ORDER BY privilege_id ASC",
        )
        .bind(role_id)
        .fetch_all(pool)
        .await
    }

    /// All `(role_id, privilege_id)` assignment pairs, for callers that
    /// need privilege sets for many roles without N+1 queries.
    pub async fn list_privilege_assignments(
        pool: &PgPool,
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT role_id, privilege_id FROM role_privileges
             ORDER BY role_id ASC, privilege_id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a role. Only non-`None` fields in `input` are applied; a
    /// `Some` privilege set replaces the junction rows wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE roles SET
                name = COALESCE($2, name),
                code = COALESCE($3, code),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let role = sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.description)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(role) = role else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(privilege_ids) = &input.privilege_ids {
            sqlx::query("DELETE FROM role_privileges WHERE role_id = $1")
                .bind(role.id)
                .execute(&mut *tx)
                .await?;
            Self::insert_privileges(&mut tx, role.id, privilege_ids).await?;
        }

        tx.commit().await?;
        Ok(Some(role))
    }

    /// Delete a role (junction rows cascade).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert junction rows for a role within an open transaction.
    async fn insert_privileges(
        tx: &mut Transaction<'_, Postgres>,
        role_id: DbId,
        privilege_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO role_privileges (role_id, privilege_id)
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(role_id)
        .bind(privilege_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
