//! Access control entities: levels, per-folder grants and the action table.

pub mod action;
pub mod level;
pub mod role;

pub use action::DocumentAction;
pub use level::AccessLevel;
pub use role::{AccessRole, CreateAccessRole, UpdateAccessRole};
