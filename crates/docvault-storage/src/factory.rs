//! Builds the configured blob store.

use std::sync::Arc;

use tracing::info;

use docvault_core::config::storage::{StorageConfig, StorageProvider};
use docvault_core::result::AppResult;
use docvault_core::traits::BlobStore;

use crate::providers::{LocalBlobStore, MemoryBlobStore};

/// Create the blob store selected by `config.provider`.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider {
        StorageProvider::Local => Arc::new(LocalBlobStore::new(&config.local.root_path).await?),
        StorageProvider::Memory => Arc::new(MemoryBlobStore::new()),
    };
    info!(provider = store.provider_type(), "Blob store ready");
    Ok(store)
}
