//! # docvault-service
//!
//! Business logic for DocVault. The [`DocumentHub`] coordinator owns the
//! entity store behind a single global read/write lock and hands out the
//! services that implement every public operation:
//!
//! - [`FolderService`]: folder CRUD, visibility-filtered reads, trees
//! - [`FileService`]: file metadata and payload transfer
//! - [`UserService`]: accounts, login and authentication
//! - [`RoleService`]: user roles, access roles and their assignment
//!
//! Mutations hold the exclusive lock for their whole read-validate-write
//! sequence; reads hold the shared lock.

pub mod context;
pub mod coordinator;
pub mod file;
pub mod folder;
pub mod hierarchy;
pub mod hub;
pub mod role;
pub mod user;
pub mod visibility;

pub use context::RequestContext;
pub use coordinator::SharedStore;
pub use file::FileService;
pub use folder::FolderService;
pub use hub::{DocumentHub, SeedReport};
pub use role::RoleService;
pub use user::UserService;
