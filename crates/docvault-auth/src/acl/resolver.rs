//! Effective access level resolution.
//!
//! Resolution order:
//! 1. Admin floor: admins start at `Viewer` on every folder.
//! 2. Grants: the highest level among the access roles on *this* folder
//!    held through any of the user's roles.
//!
//! Grants never propagate to child folders. Nothing here mutates the store
//! and nothing is cached, so role changes take effect on the next call.

use tracing::debug;

use docvault_core::types::{FileId, FolderId};
use docvault_core::{AppResult, ErrorCode};
use docvault_database::EntityStore;
use docvault_entity::access::AccessLevel;
use docvault_entity::file::File;
use docvault_entity::folder::Folder;
use docvault_entity::user::User;

/// Load a folder and the level `user` holds on it.
///
/// Fails with `RequiredFolderId` for the nil id and `FolderNotFound` when the
/// folder does not exist. A resulting level of `None` is not an error.
pub fn resolve_folder_access<S>(
    store: &S,
    user: &User,
    folder_id: FolderId,
) -> AppResult<(Folder, AccessLevel)>
where
    S: EntityStore + ?Sized,
{
    if folder_id.is_nil() {
        return Err(ErrorCode::RequiredFolderId.into());
    }
    let folder = store
        .folders()
        .find_by_id(&folder_id)?
        .ok_or(ErrorCode::FolderNotFound)?;
    let level = resolve_level(store, user, folder_id)?;
    Ok((folder, level))
}

/// Load a file and the level `user` holds on its folder.
pub fn resolve_file_access<S>(
    store: &S,
    user: &User,
    file_id: FileId,
) -> AppResult<(File, AccessLevel)>
where
    S: EntityStore + ?Sized,
{
    if file_id.is_nil() {
        return Err(ErrorCode::RequiredFileId.into());
    }
    let file = store
        .files()
        .find_by_id(&file_id)?
        .ok_or(ErrorCode::FileNotFound)?;
    let (_, level) = resolve_folder_access(store, user, file.folder_id)?;
    Ok((file, level))
}

/// The level `user` holds on `folder_id`, without checking that the folder
/// exists.
pub fn resolve_level<S>(store: &S, user: &User, folder_id: FolderId) -> AppResult<AccessLevel>
where
    S: EntityStore + ?Sized,
{
    let mut level = if user.is_admin {
        AccessLevel::Viewer
    } else {
        AccessLevel::None
    };

    for role_id in &user.role_ids {
        let Some(grant) = store.find_access_role(folder_id, *role_id)? else {
            continue;
        };
        if grant.access_level > level {
            level = grant.access_level;
            if level == AccessLevel::MAX {
                break;
            }
        }
    }

    debug!(user_id = %user.id, %folder_id, %level, "Resolved access level");
    Ok(level)
}
