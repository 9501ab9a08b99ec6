//! Request handlers, one module per resource.

pub mod privileges;
pub mod roles;
