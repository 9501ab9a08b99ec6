//! Domain core for the LIMS role & privilege service.
//!
//! Pure business logic only: the privilege catalog and its prerequisite
//! closure, role submission building and validation, role-code derivation,
//! and collaborator error-message cleanup. No I/O lives here.

pub mod codes;
pub mod error;
pub mod messages;
pub mod privileges;
pub mod roles;
pub mod types;
