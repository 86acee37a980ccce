//! Folder tree invariants: single parent, no cycles, unique sibling names,
//! delete only when empty.

pub mod validator;

pub use validator::{
    ancestors, ensure_unique_name, require_parent, validate_create, validate_delete,
    validate_reparent,
};
