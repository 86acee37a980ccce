//! Bootstrap data configuration.

use serde::{Deserialize, Serialize};

/// Accounts and folders created by `seed` on an empty store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Username of the initial administrator.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    /// Password of the initial administrator.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Display name of the initial administrator.
    #[serde(default = "default_admin_display_name")]
    pub admin_display_name: String,
    /// Name of the root folder.
    #[serde(default = "default_root_folder_name")]
    pub root_folder_name: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_display_name: default_admin_display_name(),
            root_folder_name: default_root_folder_name(),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "password".to_string()
}

fn default_admin_display_name() -> String {
    "Administrator".to_string()
}

fn default_root_folder_name() -> String {
    "root".to_string()
}
