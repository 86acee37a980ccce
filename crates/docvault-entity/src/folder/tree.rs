//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use docvault_core::types::FolderId;

use crate::access::AccessLevel;

/// A node in a visibility-filtered folder tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// The caller's level on this folder.
    pub access_level: AccessLevel,
    /// Number of files visible to the caller.
    pub file_count: u64,
    /// Visible child folder nodes. Empty past the depth limit.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Total number of nodes in this subtree, including `self`.
    pub fn total_folders(&self) -> u64 {
        1 + self.children.iter().map(FolderNode::total_folders).sum::<u64>()
    }
}

/// One step of a folder's ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
}

/// Ancestor chain from the root down to a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPath {
    /// Segments ordered root first.
    pub segments: Vec<PathSegment>,
}

impl FolderPath {
    /// Render the chain as a slash separated virtual path.
    pub fn display_path(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&segment.name);
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}
