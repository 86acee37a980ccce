//! Concrete [`docvault_core::traits::BlobStore`] implementations.

pub mod local;
pub mod memory;

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
