//! Payload upload and download.

use bytes::Bytes;
use tracing::{info, warn};

use docvault_auth::{require_access, resolve_file_access};
use docvault_core::types::FileId;
use docvault_core::{AppResult, ErrorCode};
use docvault_database::EntityStore;
use docvault_entity::access::DocumentAction;

use crate::context::{RequestContext, load_actor};

use super::service::{FileService, ensure_viewable};

impl<S: EntityStore> FileService<S> {
    /// Stores the payload of a file, replacing any previous one.
    ///
    /// Only the file's last editor may upload. The exclusive lock is held
    /// for the whole transfer, so no other operation observes the record
    /// while its payload changes.
    pub async fn upload_file_data(
        &self,
        ctx: &RequestContext,
        file_id: FileId,
        data: Bytes,
    ) -> AppResult<()> {
        let store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;

        let (file, _) = resolve_file_access(&*store, &actor, file_id)?;
        if !file.is_last_editor(actor.id) {
            warn!(user_id = %actor.id, file_id = %file.id, "Upload denied: not the last editor");
            return Err(ErrorCode::Forbidden.into());
        }
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(ErrorCode::UploadTooLarge.into());
        }

        let size = data.len();
        self.blobs.put(file.id, data).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, bytes = size, "File data uploaded");
        Ok(())
    }

    /// Reads the payload of a file.
    ///
    /// Requires `Viewer` on the folder, the last editor included. Drafts
    /// additionally follow the visibility rule of [`FileService::get_file`].
    /// `FileDataNotFound` means the record exists but nothing was uploaded.
    pub async fn download_file_data(&self, ctx: &RequestContext, file_id: FileId) -> AppResult<Bytes> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;

        let (file, level) = resolve_file_access(&*store, &actor, file_id)?;
        require_access(&actor, level, DocumentAction::FileDownload)?;
        ensure_viewable(&actor, &file, level)?;

        self.blobs
            .get(file.id)
            .await?
            .ok_or_else(|| ErrorCode::FileDataNotFound.into())
    }
}
