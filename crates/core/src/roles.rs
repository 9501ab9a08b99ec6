//! Role drafts, submission building, and field-scoped validation.
//!
//! A [`RoleDraft`] is what a human assembled: a name, an optional code, a
//! description, and the privileges they ticked. [`RoleDraft::validate`]
//! turns it into a [`RoleSubmission`] -- trimmed fields plus the privilege
//! set run through [`PrivilegeCatalog::normalize`] -- or a map of per-field
//! messages. Validation failures are data for display, not errors; nothing
//! here reaches a network layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codes::derive_role_code;
use crate::privileges::PrivilegeCatalog;
use crate::types::DbId;

/// Maximum role description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Minimum role code length, in characters.
pub const MIN_CODE_CHARS: usize = 3;

/// Field-scoped validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// A role as assembled by a human, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    pub code: String,
    pub description: String,
    pub privilege_ids: Vec<DbId>,
}

/// A validated role payload ready for persistence.
///
/// Invariant: `privilege_ids` is the normalizer's output, so every directly
/// requested privilege's prerequisite is present. A role that violates this
/// must never be persisted; the server re-validates on every write to
/// enforce it regardless of what a client sends.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleSubmission {
    pub name: String,
    pub code: String,
    pub description: String,
    pub privilege_ids: Vec<DbId>,
}

impl RoleDraft {
    /// Build a draft whose code is derived from the name.
    pub fn from_name(name: &str, description: &str, privilege_ids: Vec<DbId>) -> Self {
        Self {
            name: name.to_string(),
            code: derive_role_code(name),
            description: description.to_string(),
            privilege_ids,
        }
    }

    /// Validate the draft and build a [`RoleSubmission`].
    ///
    /// Rules:
    /// - `name` must not be blank
    /// - `code` must not be blank and must be at least
    ///   [`MIN_CODE_CHARS`] characters
    /// - `description` must be at most [`MAX_DESCRIPTION_CHARS`] characters
    /// - the privilege set, after normalization, must not be empty
    ///
    /// All failing fields are reported together so a form can mark every
    /// problem in one round trip.
    pub fn validate(&self, catalog: &PrivilegeCatalog) -> Result<RoleSubmission, FieldErrors> {
        let name = self.name.trim();
        let code = self.code.trim();
        let description = self.description.trim();
        let privilege_ids = catalog.normalize(&self.privilege_ids);

        let mut errors = FieldErrors::new();

        if name.is_empty() {
            errors.insert("name", "Name must not be blank".to_string());
        }

        if code.is_empty() {
            errors.insert("code", "Code must not be blank".to_string());
        } else if code.chars().count() < MIN_CODE_CHARS {
            errors.insert(
                "code",
                format!("Code must be at least {MIN_CODE_CHARS} characters"),
            );
        }

        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            errors.insert(
                "description",
                format!("Description must be at most {MAX_DESCRIPTION_CHARS} characters"),
            );
        }

        if privilege_ids.is_empty() {
            errors.insert(
                "privilege_ids",
                "Select at least one privilege".to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RoleSubmission {
            name: name.to_string(),
            code: code.to_string(),
            description: description.to_string(),
            privilege_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PrivilegeCatalog {
        PrivilegeCatalog::builtin()
    }

    fn draft() -> RoleDraft {
        RoleDraft {
            name: "Lab Manager".to_string(),
            code: "Lab_Manager".to_string(),
            description: "Manages laboratory staff".to_string(),
            privilege_ids: vec![3, 5],
        }
    }

    #[test]
    fn valid_draft_produces_normalized_submission() {
        let submission = draft().validate(&catalog()).unwrap();
        assert_eq!(submission.name, "Lab Manager");
        assert_eq!(submission.code, "Lab_Manager");
        let mut ids = submission.privilege_ids;
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn fields_are_trimmed() {
        let mut d = draft();
        d.name = "  Lab Manager  ".to_string();
        d.description = " Manages staff ".to_string();
        let submission = d.validate(&catalog()).unwrap();
        assert_eq!(submission.name, "Lab Manager");
        assert_eq!(submission.description, "Manages staff");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut d = draft();
        d.name = "   ".to_string();
        let errors = d.validate(&catalog()).unwrap_err();
        assert_eq!(errors["name"], "Name must not be blank");
    }

    #[test]
    fn blank_code_is_rejected() {
        let mut d = draft();
        d.code = String::new();
        let errors = d.validate(&catalog()).unwrap_err();
        assert_eq!(errors["code"], "Code must not be blank");
    }

    #[test]
    fn short_code_is_rejected() {
        let mut d = draft();
        d.code = "AB".to_string();
        let errors = d.validate(&catalog()).unwrap_err();
        assert_eq!(errors["code"], "Code must be at least 3 characters");
    }

    #[test]
    fn description_of_exactly_200_chars_passes() {
        let mut d = draft();
        d.description = "x".repeat(200);
        assert!(d.validate(&catalog()).is_ok());
    }

    #[test]
    fn description_of_201_chars_fails() {
        let mut d = draft();
        d.description = "x".repeat(201);
        let errors = d.validate(&catalog()).unwrap_err();
        assert_eq!(
            errors["description"],
            "Description must be at most 200 characters"
        );
    }

    #[test]
    fn empty_privilege_set_fails() {
        let mut d = draft();
        d.privilege_ids = vec![];
        let errors = d.validate(&catalog()).unwrap_err();
        assert_eq!(errors["privilege_ids"], "Select at least one privilege");
    }

    #[test]
    fn all_failing_fields_reported_together() {
        let d = RoleDraft {
            name: String::new(),
            code: String::new(),
            description: "x".repeat(300),
            privilege_ids: vec![],
        };
        let errors = d.validate(&catalog()).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn from_name_derives_code() {
        let d = RoleDraft::from_name("Trần Thái Thịnh", "", vec![3]);
        assert_eq!(d.code, "Tran_Thai_Thinh");
        assert!(d.validate(&catalog()).is_ok());
    }
}
