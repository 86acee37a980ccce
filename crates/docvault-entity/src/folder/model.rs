//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::traits::Entity;
use docvault_core::types::{FolderId, UserId};

use crate::access::{AccessLevel, AccessRole};
use crate::file::File;

/// A folder in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name, unique among its siblings.
    pub name: String,
    /// Parent folder. `None` only for the root folder.
    pub parent_id: Option<FolderId>,
    /// The user who last changed the folder.
    pub last_editor_id: UserId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is the root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Entity for Folder {
    type Id = FolderId;
    const KIND: &'static str = "folder";

    fn id(&self) -> FolderId {
        self.id
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder. Required for every folder except the seeded root.
    pub parent_id: Option<FolderId>,
}

/// Partial update of a folder. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// New name.
    pub name: Option<String>,
    /// New parent (reparent).
    pub parent_id: Option<FolderId>,
}

/// A folder joined with its immediate associations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The folder itself.
    #[serde(flatten)]
    pub folder: Folder,
    /// Direct child folders, in creation order.
    pub child_folders: Vec<Folder>,
    /// Files directly inside the folder, in creation order.
    pub files: Vec<File>,
    /// Access roles attached to the folder.
    pub access_roles: Vec<AccessRole>,
}

/// Folder contents after visibility filtering, with the caller's level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderView {
    /// Filtered contents.
    #[serde(flatten)]
    pub contents: FolderContents,
    /// The caller's resolved level on this folder.
    pub access_level: AccessLevel,
}
