//! # docvault-storage
//!
//! Blob store providers for file payloads. Payloads are keyed purely by file
//! id; folder paths are never used as storage keys.

pub mod factory;
pub mod providers;

pub use factory::build_blob_store;
pub use providers::{LocalBlobStore, MemoryBlobStore};
