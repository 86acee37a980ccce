//! Checks run before any folder mutation is committed.

use docvault_core::types::FolderId;
use docvault_core::{AppResult, ErrorCode};
use docvault_database::EntityStore;
use docvault_entity::folder::Folder;

/// Resolve a required parent reference.
///
/// Fails with `MissingParent` when absent (or nil) and `ParentNotFound`
/// when the id does not resolve.
pub fn require_parent<S>(store: &S, parent_id: Option<FolderId>) -> AppResult<Folder>
where
    S: EntityStore + ?Sized,
{
    let parent_id = parent_id
        .and_then(FolderId::present)
        .ok_or(ErrorCode::MissingParent)?;
    Ok(store
        .folders()
        .find_by_id(&parent_id)?
        .ok_or(ErrorCode::ParentNotFound)?)
}

/// Fail with `DuplicateName` if a child of `parent_id` other than `exclude`
/// is already called `name`.
pub fn ensure_unique_name<S>(
    store: &S,
    parent_id: FolderId,
    name: &str,
    exclude: Option<FolderId>,
) -> AppResult<()>
where
    S: EntityStore + ?Sized,
{
    match store.find_child_folder(parent_id, name)? {
        Some(existing) if Some(existing.id) != exclude => Err(ErrorCode::DuplicateName.into()),
        _ => Ok(()),
    }
}

/// Validate a new folder called `name` (already sanitized) under
/// `parent_id`, returning the parent.
pub fn validate_create<S>(store: &S, parent_id: Option<FolderId>, name: &str) -> AppResult<Folder>
where
    S: EntityStore + ?Sized,
{
    let parent = require_parent(store, parent_id)?;
    if name.is_empty() {
        return Err(ErrorCode::RequiredFolderName.into());
    }
    ensure_unique_name(store, parent.id, name, None)?;
    Ok(parent)
}

/// Validate moving `folder` under `new_parent_id`, returning the parent the
/// folder will have afterwards.
///
/// An absent (or nil) new parent keeps the current one. Otherwise the
/// ancestor chain of the new parent is walked up to the root; meeting
/// `folder` on the way (including `new_parent_id == folder.id`) is a
/// `CyclicReference`. The walk is capped at the folder count and fails
/// closed when the cap is exceeded.
pub fn validate_reparent<S>(
    store: &S,
    folder: &Folder,
    new_parent_id: Option<FolderId>,
) -> AppResult<Option<FolderId>>
where
    S: EntityStore + ?Sized,
{
    let Some(new_parent_id) = new_parent_id.and_then(FolderId::present) else {
        return Ok(folder.parent_id);
    };

    let cap = store.folder_count()?;
    let mut current = new_parent_id;
    let mut steps: u64 = 0;
    loop {
        if current == folder.id {
            return Err(ErrorCode::CyclicReference.into());
        }
        let ancestor = store
            .folders()
            .find_by_id(&current)?
            .ok_or(ErrorCode::ParentNotFound)?;
        let Some(next) = ancestor.parent_id else {
            break;
        };
        steps += 1;
        if steps > cap {
            return Err(ErrorCode::CyclicReference.into());
        }
        current = next;
    }

    Ok(Some(new_parent_id))
}

/// Fail with `FolderNotEmpty` if the folder directly holds any child
/// folder or file.
pub fn validate_delete<S>(store: &S, folder: &Folder) -> AppResult<()>
where
    S: EntityStore + ?Sized,
{
    if store.has_child_folders(folder.id)? || store.has_files(folder.id)? {
        return Err(ErrorCode::FolderNotEmpty.into());
    }
    Ok(())
}

/// The chain from the root down to `folder`, inclusive.
///
/// Bounded by the folder count like [`validate_reparent`]; a longer chain
/// means the stored data is cyclic and yields `CyclicReference`.
pub fn ancestors<S>(store: &S, folder: &Folder) -> AppResult<Vec<Folder>>
where
    S: EntityStore + ?Sized,
{
    let cap = store.folder_count()?;
    let mut chain = vec![folder.clone()];
    let mut next = folder.parent_id;
    while let Some(parent_id) = next {
        if chain.len() as u64 > cap {
            return Err(ErrorCode::CyclicReference.into());
        }
        let parent = store
            .folders()
            .find_by_id(&parent_id)?
            .ok_or(ErrorCode::ParentNotFound)?;
        next = parent.parent_id;
        chain.push(parent);
    }
    chain.reverse();
    Ok(chain)
}
