//! # docvault-core
//!
//! Core crate for DocVault. Contains the unified error system, typed
//! identifiers, configuration schemas, and the store/blob traits that the
//! other crates implement.
//!
//! This crate has **no** internal dependencies on other DocVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorCode, ErrorKind};
pub use result::AppResult;
