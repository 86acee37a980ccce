//! Folder operations.

pub mod service;
pub mod tree;

pub use service::FolderService;
