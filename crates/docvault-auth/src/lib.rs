//! # docvault-auth
//!
//! Authorization and credential handling for DocVault.
//!
//! ## Modules
//!
//! - `acl`: access level resolution over folder grants and privilege checks
//! - `password`: Argon2id password hashing and verification

pub mod acl;
pub mod password;

pub use acl::{
    can_view_file, require_access, require_admin, resolve_file_access, resolve_folder_access,
    resolve_level,
};
pub use password::PasswordHasher;
