//! File metadata CRUD with access enforcement.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use docvault_auth::{can_view_file, require_access, resolve_file_access, resolve_folder_access};
use docvault_core::traits::BlobStore;
use docvault_core::types::{FileId, FolderId};
use docvault_core::{AppResult, ErrorCode};
use docvault_database::{EntityStore, MemoryStore};
use docvault_entity::access::{AccessLevel, DocumentAction};
use docvault_entity::file::{CreateFile, File, UpdateFile};
use docvault_entity::sanitize::{prepare_name, prepare_optional};
use docvault_entity::user::User;

use crate::context::{RequestContext, load_actor};
use crate::coordinator::SharedStore;

/// Manages file records and their payloads.
#[derive(Debug)]
pub struct FileService<S: EntityStore = MemoryStore> {
    pub(crate) store: SharedStore<S>,
    pub(crate) blobs: Arc<dyn BlobStore>,
    pub(crate) max_upload_size_bytes: u64,
}

impl<S: EntityStore> FileService<S> {
    /// Creates a new file service.
    pub fn new(store: SharedStore<S>, blobs: Arc<dyn BlobStore>, max_upload_size_bytes: u64) -> Self {
        Self {
            store,
            blobs,
            max_upload_size_bytes,
        }
    }

    /// Creates a draft file record. Requires `Uploader` on the folder.
    ///
    /// The caller becomes the last editor, which is what later allows it to
    /// upload the payload and to see the draft.
    pub async fn create_file(&self, ctx: &RequestContext, req: CreateFile) -> AppResult<File> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let folder_id = req
            .folder_id
            .and_then(FolderId::present)
            .ok_or(ErrorCode::RequiredFolderId)?;
        let (folder, level) = resolve_folder_access(&*store, &actor, folder_id)?;
        require_access(&actor, level, DocumentAction::FileCreate)?;

        let name = prepare_name(&req.name);
        if name.is_empty() {
            return Err(ErrorCode::RequiredFileName.into());
        }
        if store.find_file_by_name(folder.id, &name)?.is_some() {
            return Err(ErrorCode::FileAlreadyExists.into());
        }

        let now = Utc::now();
        let file = store.files_mut().create(File {
            id: FileId::new(),
            name,
            folder_id: folder.id,
            last_editor_id: actor.id,
            is_published: false,
            created_at: now,
            updated_at: now,
        })?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = %folder.id,
            name = %file.name,
            "File created"
        );
        Ok(file)
    }

    /// Gets a file record.
    ///
    /// Unknown ids report `FileNotFound` before any permission check. The
    /// last editor always sees the file; others need `Viewer`, and
    /// `Publisher` for drafts.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<File> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        let (file, _) = viewable_file(&*store, &actor, file_id)?;
        Ok(file)
    }

    /// The caller's level on a file's folder.
    pub async fn check_access(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<AccessLevel> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        let (_, level) = resolve_file_access(&*store, &actor, file_id)?;
        Ok(level)
    }

    /// Renames, moves and/or (un)publishes a file.
    ///
    /// Requires `Publisher` on the current folder, and on the destination
    /// folder when moving. The caller becomes the last editor.
    pub async fn update_file(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        patch: UpdateFile,
    ) -> AppResult<File> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let (mut file, level) = resolve_file_access(&*store, &actor, file_id)?;
        require_access(&actor, level, DocumentAction::FileUpdate)?;

        let folder_id = match patch
            .folder_id
            .and_then(FolderId::present)
            .filter(|id| *id != file.folder_id)
        {
            Some(destination) => {
                let (folder, level) = resolve_folder_access(&*store, &actor, destination)?;
                require_access(&actor, level, DocumentAction::FileUpdate)?;
                folder.id
            }
            None => file.folder_id,
        };

        let name = prepare_optional(patch.name.as_deref()).unwrap_or_else(|| file.name.clone());
        if let Some(existing) = store.find_file_by_name(folder_id, &name)? {
            if existing.id != file.id {
                return Err(ErrorCode::FileAlreadyExists.into());
            }
        }

        file.name = name;
        file.folder_id = folder_id;
        if let Some(is_published) = patch.is_published {
            file.is_published = is_published;
        }
        file.last_editor_id = actor.id;
        file.updated_at = Utc::now();
        let file = store.files_mut().update(file)?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            folder_id = %file.folder_id,
            is_published = file.is_published,
            "File updated"
        );
        Ok(file)
    }

    /// Deletes a file record and its payload. Requires `Publisher`.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<()> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let (file, level) = resolve_file_access(&*store, &actor, file_id)?;
        require_access(&actor, level, DocumentAction::FileDelete)?;

        // Payload first: a failed blob delete leaves the record for a retry.
        let had_payload = self.blobs.delete(file.id).await?;
        store.files_mut().delete(&file.id)?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            had_payload,
            "File deleted"
        );
        Ok(())
    }
}

/// Load a file the actor is allowed to see, with the actor's level.
pub(crate) fn viewable_file<S>(store: &S, actor: &User, file_id: FileId) -> AppResult<(File, AccessLevel)>
where
    S: EntityStore + ?Sized,
{
    let (file, level) = resolve_file_access(store, actor, file_id)?;
    ensure_viewable(actor, &file, level)?;
    Ok((file, level))
}

/// Fail with `Forbidden` unless `actor`, holding `level`, may see `file`.
pub(crate) fn ensure_viewable(actor: &User, file: &File, level: AccessLevel) -> AppResult<()> {
    if !can_view_file(actor, file, level) {
        warn!(user_id = %actor.id, file_id = %file.id, %level, "File read denied");
        return Err(ErrorCode::Forbidden.into());
    }
    Ok(())
}
