//! Privilege checks against a resolved access level.

use tracing::warn;

use docvault_core::{AppResult, ErrorCode};
use docvault_entity::access::{AccessLevel, DocumentAction};
use docvault_entity::file::File;
use docvault_entity::user::User;

/// Fail with `Forbidden` unless `level` satisfies `action`.
///
/// Admin-only actions never pass this check; use [`require_admin`].
pub fn require_access(user: &User, level: AccessLevel, action: DocumentAction) -> AppResult<()> {
    match action.required_level() {
        Some(required) if level.has_at_least(required) => Ok(()),
        required => {
            warn!(
                user_id = %user.id,
                action = %action,
                %level,
                required = ?required,
                "Access denied"
            );
            Err(ErrorCode::Forbidden.into())
        }
    }
}

/// Fail with `Forbidden` unless `user` is an administrator.
pub fn require_admin(user: &User, action: DocumentAction) -> AppResult<()> {
    if user.is_admin {
        return Ok(());
    }
    warn!(user_id = %user.id, action = %action, "Admin action denied");
    Err(ErrorCode::Forbidden.into())
}

/// Whether `user`, holding `level` on the file's folder, may see the file.
///
/// The last editor always sees the file. Anyone else needs `Viewer`, and
/// drafts additionally need `Publisher`.
pub fn can_view_file(user: &User, file: &File, level: AccessLevel) -> bool {
    if file.is_last_editor(user.id) {
        return true;
    }
    if !level.has_at_least(AccessLevel::Viewer) {
        return false;
    }
    file.is_published || level.has_at_least(AccessLevel::Publisher)
}
