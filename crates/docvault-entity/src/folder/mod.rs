//! Folder domain entities.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, Folder, FolderContents, FolderView, UpdateFolder};
pub use tree::{FolderNode, FolderPath, PathSegment};
