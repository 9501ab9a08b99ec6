//! HTTP client for the role & privilege service.
//!
//! Plays the part of the submitting front-end: builds role submissions with
//! `lims-core`, posts them to the service, and reduces whatever error body
//! comes back to a single display string.

pub mod client;
pub mod error;

pub use client::{RemoteRole, RoleServiceClient};
pub use error::ClientError;
