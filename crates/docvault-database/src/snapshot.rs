//! JSON snapshot persistence for [`MemoryStore`].

use std::path::Path;

use tracing::{debug, info};

use docvault_core::{AppError, AppResult, ErrorKind};

use crate::memory::MemoryStore;

/// Load a store from a snapshot file.
///
/// A missing file yields an empty store.
pub async fn load(path: impl AsRef<Path>) -> AppResult<MemoryStore> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        debug!(path = %path.display(), "No snapshot found, starting empty");
        return Ok(MemoryStore::new());
    }

    let raw = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Store,
            format!("Failed to read snapshot '{}'", path.display()),
            e,
        )
    })?;
    let store: MemoryStore = serde_json::from_slice(&raw)?;
    info!(path = %path.display(), "Snapshot loaded");
    Ok(store)
}

/// Write a store to a snapshot file.
///
/// The document is written next to the target and renamed into place so a
/// crash never leaves a truncated snapshot behind.
pub async fn save(store: &MemoryStore, path: impl AsRef<Path>) -> AppResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_vec_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Store,
            format!("Failed to write snapshot '{}'", tmp.display()),
            e,
        )
    })?;
    tokio::fs::rename(&tmp, path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Store,
            format!("Failed to replace snapshot '{}'", path.display()),
            e,
        )
    })?;

    debug!(path = %path.display(), "Snapshot saved");
    Ok(())
}
