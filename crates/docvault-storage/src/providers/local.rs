//! Local filesystem blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::BlobStore;
use docvault_core::types::FileId;

/// Stores each payload as `<root>/<file id>`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all payloads.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new local blob store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    fn resolve(&self, file_id: FileId) -> PathBuf {
        self.root.join(file_id.to_string())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn put(&self, file_id: FileId, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(file_id);
        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write payload for file {file_id}"),
                e,
            )
        })?;

        debug!(%file_id, bytes = data.len(), "Wrote payload");
        Ok(())
    }

    async fn get(&self, file_id: FileId) -> AppResult<Option<Bytes>> {
        match fs::read(self.resolve(file_id)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read payload for file {file_id}"),
                e,
            )),
        }
    }

    async fn delete(&self, file_id: FileId) -> AppResult<bool> {
        match fs::remove_file(self.resolve(file_id)).await {
            Ok(()) => {
                debug!(%file_id, "Deleted payload");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete payload for file {file_id}"),
                e,
            )),
        }
    }

    async fn exists(&self, file_id: FileId) -> AppResult<bool> {
        Ok(fs::try_exists(self.resolve(file_id)).await?)
    }
}
