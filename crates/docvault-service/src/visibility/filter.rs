//! Visibility filter applied to a folder read before it leaves the service.

use tracing::debug;

use docvault_auth::{can_view_file, resolve_level};
use docvault_core::{AppError, AppResult};
use docvault_database::EntityStore;
use docvault_entity::access::AccessLevel;
use docvault_entity::file::File;
use docvault_entity::folder::{FolderContents, FolderView};
use docvault_entity::user::User;

/// Keep the files `user` may see in a folder where it holds `level`.
///
/// Uses the same rule as a single file read: below `Publisher`, drafts are
/// dropped unless `user` last edited them, and below `Viewer` only the
/// files `user` last edited remain. Order is preserved.
pub fn visible_files(user: &User, files: Vec<File>, level: AccessLevel) -> Vec<File> {
    files
        .into_iter()
        .filter(|file| can_view_file(user, file, level))
        .collect()
}

/// Filter a folder's immediate contents for `user`, who holds `level` on it.
///
/// Each child folder is resolved independently (grants are not inherited)
/// and dropped when the result is `None`. The caller's level is attached to
/// the returned view.
pub fn apply_visibility<S>(
    store: &S,
    user: &User,
    contents: FolderContents,
    level: AccessLevel,
) -> AppResult<FolderView>
where
    S: EntityStore + ?Sized,
{
    let FolderContents {
        folder,
        child_folders,
        files,
        access_roles,
    } = contents;

    let total_children = child_folders.len();
    let mut visible_children = Vec::with_capacity(total_children);
    for child in child_folders {
        match resolve_level(store, user, child.id)? {
            AccessLevel::Unset => {
                return Err(AppError::internal(format!(
                    "Resolved an unset access level on folder {}",
                    child.id
                )));
            }
            AccessLevel::None => {}
            _ => visible_children.push(child),
        }
    }

    let total_files = files.len();
    let files = visible_files(user, files, level);

    debug!(
        user_id = %user.id,
        folder_id = %folder.id,
        %level,
        hidden_folders = total_children - visible_children.len(),
        hidden_files = total_files - files.len(),
        "Applied visibility filter"
    );

    Ok(FolderView {
        contents: FolderContents {
            folder,
            child_folders: visible_children,
            files,
            access_roles,
        },
        access_level: level,
    })
}
