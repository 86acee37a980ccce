//! In-memory entity store.

use serde::{Deserialize, Serialize};

use docvault_core::traits::Repository;
use docvault_entity::access::AccessRole;
use docvault_entity::file::File;
use docvault_entity::folder::Folder;
use docvault_entity::user::{User, UserRole};

use crate::store::EntityStore;
use crate::table::MemoryTable;

/// All entity tables held in process memory.
///
/// Serializes to a single JSON document; see [`crate::snapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    users: MemoryTable<User>,
    #[serde(default)]
    folders: MemoryTable<Folder>,
    #[serde(default)]
    files: MemoryTable<File>,
    #[serde(default)]
    user_roles: MemoryTable<UserRole>,
    #[serde(default)]
    access_roles: MemoryTable<AccessRole>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no entity of any kind is stored.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.folders.is_empty()
            && self.files.is_empty()
            && self.user_roles.is_empty()
            && self.access_roles.is_empty()
    }
}

impl EntityStore for MemoryStore {
    fn users(&self) -> &dyn Repository<User> {
        &self.users
    }

    fn users_mut(&mut self) -> &mut dyn Repository<User> {
        &mut self.users
    }

    fn folders(&self) -> &dyn Repository<Folder> {
        &self.folders
    }

    fn folders_mut(&mut self) -> &mut dyn Repository<Folder> {
        &mut self.folders
    }

    fn files(&self) -> &dyn Repository<File> {
        &self.files
    }

    fn files_mut(&mut self) -> &mut dyn Repository<File> {
        &mut self.files
    }

    fn user_roles(&self) -> &dyn Repository<UserRole> {
        &self.user_roles
    }

    fn user_roles_mut(&mut self) -> &mut dyn Repository<UserRole> {
        &mut self.user_roles
    }

    fn access_roles(&self) -> &dyn Repository<AccessRole> {
        &self.access_roles
    }

    fn access_roles_mut(&mut self) -> &mut dyn Repository<AccessRole> {
        &mut self.access_roles
    }
}
