//! Repositories: one unit struct per table with static async methods.

pub mod privilege_repo;
pub mod role_repo;

pub use privilege_repo::PrivilegeRepo;
pub use role_repo::RoleRepo;
