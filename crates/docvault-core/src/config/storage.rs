//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Which backend holds file payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// Payloads live under `local.root_path`.
    Local,
    /// Payloads live in process memory.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend used for file payloads.
    #[serde(default = "default_provider")]
    pub provider: StorageProvider,
    /// Maximum upload size in bytes (default 8 GiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_upload_size_bytes: default_max_upload(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local payload storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> StorageProvider {
    StorageProvider::Local
}

fn default_max_upload() -> u64 {
    8 * 1024 * 1024 * 1024
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}
