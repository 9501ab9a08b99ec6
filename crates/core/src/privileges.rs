//! Privilege catalog and prerequisite closure.
//!
//! Some privileges only make sense when another privilege is also held
//! (e.g. "update test orders" requires "view test orders"). The catalog
//! records those prerequisite edges; [`PrivilegeCatalog::normalize`] expands
//! a user-chosen privilege set so the constraint always holds before a role
//! is persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// An atomic permission grantable to a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Privilege {
    pub id: DbId,
    pub name: String,
}

/// Prerequisite edges for the built-in privilege set.
///
/// `(dependent, prerequisite)`: holding `dependent` requires also holding
/// `prerequisite`. Must match the seed data in
/// `20260815000001_create_privileges.sql`.
pub const BUILTIN_DEPENDENCIES: &[(DbId, DbId)] = &[
    (3, 1),
    (5, 1),
    (7, 1),
    (11, 9),
    (15, 13),
    (17, 13),
    (20, 18),
    (24, 22),
    (28, 27),
];

/// Read-only table of privilege prerequisite edges.
///
/// Always passed in as a value (constructed from [`builtin`](Self::builtin)
/// or loaded from the `privilege_dependencies` table) so callers and tests
/// can substitute alternate catalogs without global state.
///
/// Each dependent privilege has at most one direct prerequisite. An id with
/// no entry -- including ids the catalog has never heard of -- is treated as
/// independent; which ids are legitimate privileges at all is the server's
/// concern, not the catalog's.
#[derive(Debug, Clone, Default)]
pub struct PrivilegeCatalog {
    prerequisites: HashMap<DbId, DbId>,
}

impl PrivilegeCatalog {
    /// Build a catalog from `(dependent, prerequisite)` edges.
    ///
    /// A duplicate dependent keeps the last edge seen, preserving the
    /// one-prerequisite-per-dependent contract.
    pub fn from_edges(edges: impl IntoIterator<Item = (DbId, DbId)>) -> Self {
        Self {
            prerequisites: edges.into_iter().collect(),
        }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self::from_edges(BUILTIN_DEPENDENCIES.iter().copied())
    }

    /// Direct prerequisite of `id`, if it has one.
    pub fn prerequisite_of(&self, id: DbId) -> Option<DbId> {
        self.prerequisites.get(&id).copied()
    }

    /// Number of dependency edges in the catalog.
    pub fn len(&self) -> usize {
        self.prerequisites.len()
    }

    /// Whether the catalog has no dependency edges.
    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Expand `requested` so every directly requested privilege's
    /// prerequisite is present.
    ///
    /// Single pass: prerequisites of *requested* ids are added, but
    /// prerequisites-of-prerequisites are not resolved. The current catalog
    /// has no chain deeper than one level, so this is equivalent to a full
    /// closure today; `depth_two_chain_resolves_one_level` below pins the
    /// behavior so a deeper chain added later fails a test instead of
    /// silently changing semantics.
    ///
    /// The result is deduplicated. Requested ids come first in input order,
    /// staged prerequisites after -- but element order is not part of the
    /// contract and callers must not depend on it.
    pub fn normalize(&self, requested: &[DbId]) -> Vec<DbId> {
        let mut result: Vec<DbId> = Vec::with_capacity(requested.len());
        for &id in requested {
            if !result.contains(&id) {
                result.push(id);
            }
        }

        let mut staged: Vec<DbId> = Vec::new();
        for &id in &result {
            if let Some(prerequisite) = self.prerequisite_of(id) {
                if !result.contains(&prerequisite) && !staged.contains(&prerequisite) {
                    staged.push(prerequisite);
                }
            }
        }

        result.extend(staged);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut ids: Vec<DbId>) -> Vec<DbId> {
        ids.sort_unstable();
        ids
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let catalog = PrivilegeCatalog::builtin();
        assert!(catalog.normalize(&[]).is_empty());
    }

    #[test]
    fn adds_direct_prerequisite() {
        let catalog = PrivilegeCatalog::builtin();
        assert_eq!(sorted(catalog.normalize(&[3])), vec![1, 3]);
    }

    #[test]
    fn adds_prerequisites_for_multiple_groups() {
        let catalog = PrivilegeCatalog::builtin();
        assert_eq!(sorted(catalog.normalize(&[24, 28])), vec![22, 24, 27, 28]);
    }

    #[test]
    fn already_closed_set_is_unchanged() {
        let catalog = PrivilegeCatalog::builtin();
        assert_eq!(sorted(catalog.normalize(&[1, 3, 5, 7])), vec![1, 3, 5, 7]);
    }

    #[test]
    fn result_is_superset_of_input() {
        let catalog = PrivilegeCatalog::builtin();
        for requested in [vec![3], vec![11, 15], vec![2, 4, 6], vec![1, 20, 24, 28]] {
            let normalized = catalog.normalize(&requested);
            for id in &requested {
                assert!(normalized.contains(id), "{id} missing from {normalized:?}");
            }
        }
    }

    #[test]
    fn idempotent_on_builtin_catalog() {
        // Holds because no built-in chain is deeper than one level.
        let catalog = PrivilegeCatalog::builtin();
        let once = catalog.normalize(&[3, 11, 17, 20]);
        let twice = catalog.normalize(&once);
        assert_eq!(sorted(once), sorted(twice));
    }

    #[test]
    fn unknown_ids_pass_through_without_error() {
        let catalog = PrivilegeCatalog::builtin();
        assert_eq!(sorted(catalog.normalize(&[999, 3])), vec![1, 3, 999]);
    }

    #[test]
    fn duplicate_input_ids_are_deduplicated() {
        let catalog = PrivilegeCatalog::builtin();
        assert_eq!(sorted(catalog.normalize(&[3, 3, 1, 3])), vec![1, 3]);
    }

    #[test]
    fn prerequisite_shared_by_two_dependents_is_added_once() {
        let catalog = PrivilegeCatalog::builtin();
        assert_eq!(sorted(catalog.normalize(&[15, 17])), vec![13, 15, 17]);
    }

    #[test]
    fn depth_two_chain_resolves_one_level() {
        // Regression guard: normalization is deliberately single-pass. With
        // a chain 30 -> 20 -> 18, requesting {30} pulls in 20 but NOT 18.
        // If this test starts mattering for real catalog data, the depth
        // question needs a product decision, not a quiet code change.
        let catalog = PrivilegeCatalog::from_edges([(30, 20), (20, 18)]);
        let normalized = catalog.normalize(&[30]);
        assert_eq!(sorted(normalized.clone()), vec![20, 30]);
        assert!(!normalized.contains(&18));

        // A second application does finish the job, which is exactly why
        // single application is what the contract pins down.
        assert_eq!(sorted(catalog.normalize(&normalized)), vec![18, 20, 30]);
    }

    #[test]
    fn injected_catalog_overrides_builtin_edges() {
        let catalog = PrivilegeCatalog::from_edges([(3, 2)]);
        assert_eq!(sorted(catalog.normalize(&[3])), vec![2, 3]);
    }

    #[test]
    fn builtin_catalog_edge_count() {
        assert_eq!(PrivilegeCatalog::builtin().len(), 9);
        assert!(!PrivilegeCatalog::builtin().is_empty());
    }
}
