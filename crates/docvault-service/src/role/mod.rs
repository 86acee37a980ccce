//! User roles, access roles and their assignment to users.

pub mod assignment;
pub mod service;

pub use service::RoleService;
