//! # docvault-database
//!
//! The entity store: an [`EntityStore`] trait giving typed repository access
//! to users, folders, files, user roles and access roles, an in-memory
//! implementation, and JSON snapshot persistence.

pub mod memory;
pub mod snapshot;
pub mod store;
pub mod table;

pub use memory::MemoryStore;
pub use store::EntityStore;
pub use table::MemoryTable;
