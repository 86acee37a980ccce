//! Entity store configuration.

use serde::{Deserialize, Serialize};

/// Where the in-memory entity store is persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON snapshot file. No persistence when unset.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: Option<String>,
    /// Write the snapshot after every successful mutation.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            autosave: default_autosave(),
        }
    }
}

fn default_snapshot_path() -> Option<String> {
    Some("./data/docvault.json".to_string())
}

fn default_autosave() -> bool {
    true
}
