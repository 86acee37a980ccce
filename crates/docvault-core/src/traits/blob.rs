//! Blob store trait for file payloads.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::FileId;

/// Trait for file payload backends.
///
/// Payloads are addressed by the owning file's id. The trait is defined in
/// `docvault-core` and implemented in `docvault-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Store the payload for a file, replacing any previous payload.
    async fn put(&self, file_id: FileId, data: Bytes) -> AppResult<()>;

    /// Read the payload for a file. Returns `None` when nothing was uploaded.
    async fn get(&self, file_id: FileId) -> AppResult<Option<Bytes>>;

    /// Delete the payload for a file. Returns `true` if one existed.
    async fn delete(&self, file_id: FileId) -> AppResult<bool>;

    /// Check whether a payload exists for a file.
    async fn exists(&self, file_id: FileId) -> AppResult<bool>;
}
