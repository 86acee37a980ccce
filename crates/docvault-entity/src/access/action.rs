//! Document actions and the access level each one requires.

use serde::{Deserialize, Serialize};

use super::level::AccessLevel;

/// Actions that are checked against a caller's resolved access level.
///
/// Folder-scoped actions name the folder whose level is checked: for
/// `FolderCreate`, `FolderUpdate` and `FolderDelete` that is the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    // -- Folder actions --
    /// List a folder and its visible content.
    FolderRead,
    /// Create a child folder.
    FolderCreate,
    /// Rename or move a folder.
    FolderUpdate,
    /// Delete an empty folder.
    FolderDelete,

    // -- File actions --
    /// Read file metadata.
    FileRead,
    /// Create a file record in a folder.
    FileCreate,
    /// Rename, move or publish a file.
    FileUpdate,
    /// Delete a file and its payload.
    FileDelete,
    /// Download a file payload.
    FileDownload,

    // -- Admin actions --
    /// Manage user accounts.
    UserManage,
    /// Manage user roles and their assignment.
    UserRoleManage,
    /// Manage access roles.
    AccessRoleManage,
}

impl DocumentAction {
    /// The folder level required for this action, or `None` for
    /// admin-only actions that are not folder scoped.
    pub fn required_level(&self) -> Option<AccessLevel> {
        match self {
            Self::FolderRead | Self::FileRead | Self::FileDownload => Some(AccessLevel::Viewer),
            Self::FileCreate => Some(AccessLevel::Uploader),
            Self::FolderCreate
            | Self::FolderUpdate
            | Self::FolderDelete
            | Self::FileUpdate
            | Self::FileDelete => Some(AccessLevel::Publisher),
            Self::UserManage | Self::UserRoleManage | Self::AccessRoleManage => None,
        }
    }

    /// Check if only administrators may perform this action.
    pub fn is_admin_only(&self) -> bool {
        self.required_level().is_none()
    }

    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FolderRead => "folder:read",
            Self::FolderCreate => "folder:create",
            Self::FolderUpdate => "folder:update",
            Self::FolderDelete => "folder:delete",
            Self::FileRead => "file:read",
            Self::FileCreate => "file:create",
            Self::FileUpdate => "file:update",
            Self::FileDelete => "file:delete",
            Self::FileDownload => "file:download",
            Self::UserManage => "user:manage",
            Self::UserRoleManage => "user_role:manage",
            Self::AccessRoleManage => "access_role:manage",
        }
    }
}

impl std::fmt::Display for DocumentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
