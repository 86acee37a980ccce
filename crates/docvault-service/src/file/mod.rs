//! File metadata and payload operations.

pub mod service;
pub mod transfer;

pub use service::FileService;
