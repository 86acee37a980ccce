//! Folder CRUD operations with access enforcement.

use chrono::Utc;
use tracing::info;

use docvault_auth::{require_access, resolve_folder_access, resolve_level};
use docvault_core::types::FolderId;
use docvault_core::{AppResult, ErrorCode};
use docvault_database::{EntityStore, MemoryStore};
use docvault_entity::access::{AccessLevel, DocumentAction};
use docvault_entity::folder::{CreateFolder, Folder, FolderView, UpdateFolder};
use docvault_entity::sanitize::{prepare_name, prepare_optional};
use docvault_entity::user::User;

use crate::context::{RequestContext, load_actor};
use crate::coordinator::SharedStore;
use crate::hierarchy;
use crate::role::assignment;
use crate::visibility::apply_visibility;

/// Manages folder CRUD operations.
#[derive(Debug)]
pub struct FolderService<S: EntityStore = MemoryStore> {
    pub(crate) store: SharedStore<S>,
}

impl<S: EntityStore> FolderService<S> {
    /// Creates a new folder service.
    pub fn new(store: SharedStore<S>) -> Self {
        Self { store }
    }

    /// Creates a child folder. Requires `Publisher` on the parent.
    pub async fn create_folder(&self, ctx: &RequestContext, req: CreateFolder) -> AppResult<Folder> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let parent = hierarchy::require_parent(&*store, req.parent_id)?;
        let level = resolve_level(&*store, &actor, parent.id)?;
        require_access(&actor, level, DocumentAction::FolderCreate)?;

        let name = prepare_name(&req.name);
        hierarchy::validate_create(&*store, Some(parent.id), &name)?;

        let now = Utc::now();
        let folder = store.folders_mut().create(Folder {
            id: FolderId::new(),
            name,
            parent_id: Some(parent.id),
            last_editor_id: actor.id,
            created_at: now,
            updated_at: now,
        })?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = %parent.id,
            name = %folder.name,
            "Folder created"
        );
        Ok(folder)
    }

    /// Gets a folder with its visible children and files, together with the
    /// caller's level on it. Requires `Viewer`.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<FolderView> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        visible_folder(&*store, &actor, folder_id)
    }

    /// The caller's level on a folder.
    pub async fn check_access(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<AccessLevel> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        let (_, level) = resolve_folder_access(&*store, &actor, folder_id)?;
        Ok(level)
    }

    /// Renames and/or moves a folder.
    ///
    /// Requires `Publisher` on the current parent and, when moving, on the
    /// new parent too. The root folder cannot be updated.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        patch: UpdateFolder,
    ) -> AppResult<Folder> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let mut folder = load_folder(&*store, folder_id)?;
        let Some(current_parent) = folder.parent_id else {
            return Err(ErrorCode::RootFolderImmutable.into());
        };
        let level = resolve_level(&*store, &actor, current_parent)?;
        require_access(&actor, level, DocumentAction::FolderUpdate)?;

        let requested_parent = patch.parent_id.and_then(FolderId::present);
        if let Some(new_parent) = requested_parent.filter(|id| *id != current_parent) {
            if store.folders().find_by_id(&new_parent)?.is_none() {
                return Err(ErrorCode::ParentNotFound.into());
            }
            let level = resolve_level(&*store, &actor, new_parent)?;
            require_access(&actor, level, DocumentAction::FolderUpdate)?;
        }
        let parent_id = hierarchy::validate_reparent(&*store, &folder, requested_parent)?
            .unwrap_or(current_parent);

        let name = prepare_optional(patch.name.as_deref()).unwrap_or_else(|| folder.name.clone());
        hierarchy::ensure_unique_name(&*store, parent_id, &name, Some(folder.id))?;

        folder.name = name;
        folder.parent_id = Some(parent_id);
        folder.last_editor_id = actor.id;
        folder.updated_at = Utc::now();
        let folder = store.folders_mut().update(folder)?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = %parent_id,
            name = %folder.name,
            "Folder updated"
        );
        Ok(folder)
    }

    /// Deletes an empty folder and its access roles.
    ///
    /// Requires `Publisher` on the parent. The root folder cannot be deleted.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: FolderId) -> AppResult<()> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let folder = load_folder(&*store, folder_id)?;
        let Some(parent_id) = folder.parent_id else {
            return Err(ErrorCode::RootFolderImmutable.into());
        };
        let level = resolve_level(&*store, &actor, parent_id)?;
        require_access(&actor, level, DocumentAction::FolderDelete)?;

        hierarchy::validate_delete(&*store, &folder)?;

        let grants = assignment::delete_folder_grants(&mut *store, folder.id)?;
        store.folders_mut().delete(&folder.id)?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            access_roles_removed = grants,
            "Folder deleted"
        );
        Ok(())
    }
}

/// Load a folder, failing with `RequiredFolderId` / `FolderNotFound`.
pub(crate) fn load_folder<S>(store: &S, folder_id: FolderId) -> AppResult<Folder>
where
    S: EntityStore + ?Sized,
{
    let folder_id = folder_id.present().ok_or(ErrorCode::RequiredFolderId)?;
    Ok(store
        .folders()
        .find_by_id(&folder_id)?
        .ok_or(ErrorCode::FolderNotFound)?)
}

/// Resolve, authorize (`Viewer`) and filter one folder read.
pub(crate) fn visible_folder<S>(store: &S, actor: &User, folder_id: FolderId) -> AppResult<FolderView>
where
    S: EntityStore + ?Sized,
{
    let (folder, level) = resolve_folder_access(store, actor, folder_id)?;
    require_access(actor, level, DocumentAction::FolderRead)?;
    let contents = store
        .folder_contents(folder.id)?
        .ok_or(ErrorCode::FolderNotFound)?;
    apply_visibility(store, actor, contents, level)
}
