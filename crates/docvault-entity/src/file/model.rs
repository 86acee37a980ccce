//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::traits::Entity;
use docvault_core::types::{FileId, FolderId, UserId};

/// Metadata of a document stored in a folder.
///
/// A record may exist before any payload has been uploaded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Unique file identifier; also the blob key.
    pub id: FileId,
    /// File name, unique within its folder.
    pub name: String,
    /// The containing folder.
    pub folder_id: FolderId,
    /// The user who last changed the file.
    pub last_editor_id: UserId,
    /// Drafts (`false`) are hidden from most callers.
    pub is_published: bool,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Check if the file is still a draft.
    pub fn is_draft(&self) -> bool {
        !self.is_published
    }

    /// Check if the given user last edited the file.
    pub fn is_last_editor(&self, user_id: UserId) -> bool {
        self.last_editor_id == user_id
    }
}

impl Entity for File {
    type Id = FileId;
    const KIND: &'static str = "file";

    fn id(&self) -> FileId {
        self.id
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFile {
    /// File name.
    pub name: String,
    /// Target folder.
    pub folder_id: Option<FolderId>,
}

/// Partial update of a file. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFile {
    /// New name.
    pub name: Option<String>,
    /// Destination folder.
    pub folder_id: Option<FolderId>,
    /// New publish state.
    pub is_published: Option<bool>,
}
