//! Access level resolution and privilege checks.

pub mod checker;
pub mod resolver;

pub use checker::{can_view_file, require_access, require_admin};
pub use resolver::{resolve_file_access, resolve_folder_access, resolve_level};
