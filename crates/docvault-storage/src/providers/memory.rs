//! In-memory blob store.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use docvault_core::result::AppResult;
use docvault_core::traits::BlobStore;
use docvault_core::types::FileId;

/// Keeps payloads in a concurrent map. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<FileId, Bytes>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Returns `true` when no payload is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn put(&self, file_id: FileId, data: Bytes) -> AppResult<()> {
        self.blobs.insert(file_id, data);
        Ok(())
    }

    async fn get(&self, file_id: FileId) -> AppResult<Option<Bytes>> {
        Ok(self.blobs.get(&file_id).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, file_id: FileId) -> AppResult<bool> {
        Ok(self.blobs.remove(&file_id).is_some())
    }

    async fn exists(&self, file_id: FileId) -> AppResult<bool> {
        Ok(self.blobs.contains_key(&file_id))
    }
}
