//! # docvault-entity
//!
//! Domain entity models for DocVault. Every struct in this crate is either a
//! stored record (implementing [`docvault_core::traits::Entity`]), a request
//! or patch value, or a read-side view assembled by the service layer. All
//! entities derive `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod access;
pub mod file;
pub mod folder;
pub mod sanitize;
pub mod user;

pub use access::{AccessLevel, AccessRole, DocumentAction};
pub use file::File;
pub use folder::Folder;
pub use user::{User, UserRole};
