//! Pruning of folder listings according to the caller's access.

pub mod filter;

pub use filter::{apply_visibility, visible_files};
