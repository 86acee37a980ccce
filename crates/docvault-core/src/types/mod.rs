//! Shared domain types.

pub mod id;

pub use id::{AccessRoleId, FileId, FolderId, UserId, UserRoleId};
