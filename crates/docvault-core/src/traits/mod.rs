//! Core traits defined in `docvault-core` and implemented by other crates.

pub mod blob;
pub mod repository;

pub use blob::BlobStore;
pub use repository::{Entity, Repository};
