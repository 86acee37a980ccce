//! The entity store contract.

use docvault_core::AppResult;
use docvault_core::traits::Repository;
use docvault_core::types::{FolderId, UserRoleId};
use docvault_entity::access::AccessRole;
use docvault_entity::file::File;
use docvault_entity::folder::{Folder, FolderContents};
use docvault_entity::user::{User, UserRole};

/// Typed access to every entity table plus the association queries the
/// service layer needs.
///
/// Implementations must be immediately consistent with the caller's own
/// prior writes. Callers hold the global store lock for the whole
/// read-validate-write sequence, so no method here locks.
pub trait EntityStore: Send + Sync + 'static {
    /// User table.
    fn users(&self) -> &dyn Repository<User>;
    /// Mutable user table.
    fn users_mut(&mut self) -> &mut dyn Repository<User>;
    /// Folder table.
    fn folders(&self) -> &dyn Repository<Folder>;
    /// Mutable folder table.
    fn folders_mut(&mut self) -> &mut dyn Repository<Folder>;
    /// File table.
    fn files(&self) -> &dyn Repository<File>;
    /// Mutable file table.
    fn files_mut(&mut self) -> &mut dyn Repository<File>;
    /// User role table.
    fn user_roles(&self) -> &dyn Repository<UserRole>;
    /// Mutable user role table.
    fn user_roles_mut(&mut self) -> &mut dyn Repository<UserRole>;
    /// Access role table.
    fn access_roles(&self) -> &dyn Repository<AccessRole>;
    /// Mutable access role table.
    fn access_roles_mut(&mut self) -> &mut dyn Repository<AccessRole>;

    // -- Folder queries --

    /// The folder without a parent, if one has been seeded.
    fn root_folder(&self) -> AppResult<Option<Folder>> {
        self.folders().find_one(&|f: &Folder| f.is_root())
    }

    /// Direct children of a folder, in creation order.
    fn child_folders(&self, parent_id: FolderId) -> AppResult<Vec<Folder>> {
        self.folders().filter(&|f: &Folder| f.parent_id == Some(parent_id))
    }

    /// The child of `parent_id` called `name`, if any.
    fn find_child_folder(&self, parent_id: FolderId, name: &str) -> AppResult<Option<Folder>> {
        self.folders()
            .find_one(&|f: &Folder| f.parent_id == Some(parent_id) && f.name == name)
    }

    /// A folder joined with its immediate children, files and access roles.
    fn folder_contents(&self, folder_id: FolderId) -> AppResult<Option<FolderContents>> {
        let Some(folder) = self.folders().find_by_id(&folder_id)? else {
            return Ok(None);
        };
        Ok(Some(FolderContents {
            child_folders: self.child_folders(folder_id)?,
            files: self.files_in(folder_id)?,
            access_roles: self.access_roles_for_folder(folder_id)?,
            folder,
        }))
    }

    // -- File queries --

    /// Files directly inside a folder, in creation order.
    fn files_in(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        self.files().filter(&|f: &File| f.folder_id == folder_id)
    }

    /// The file in `folder_id` called `name`, if any.
    fn find_file_by_name(&self, folder_id: FolderId, name: &str) -> AppResult<Option<File>> {
        self.files()
            .find_one(&|f: &File| f.folder_id == folder_id && f.name == name)
    }

    /// Check whether any file lives in the folder.
    fn has_files(&self, folder_id: FolderId) -> AppResult<bool> {
        Ok(self
            .files()
            .find_one(&|f: &File| f.folder_id == folder_id)?
            .is_some())
    }

    /// Check whether any folder has `folder_id` as its parent.
    fn has_child_folders(&self, folder_id: FolderId) -> AppResult<bool> {
        Ok(self
            .folders()
            .find_one(&|f: &Folder| f.parent_id == Some(folder_id))?
            .is_some())
    }

    // -- User queries --

    /// Look a user up by username, tombstoned accounts included.
    fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.users().find_one(&|u: &User| u.username == username)
    }

    /// Users currently holding a role.
    fn holders_of(&self, role_id: UserRoleId) -> AppResult<Vec<User>> {
        self.users().filter(&|u: &User| u.holds_role(role_id))
    }

    /// The roles a user holds, in assignment order. Dangling ids are skipped.
    fn roles_of(&self, user: &User) -> AppResult<Vec<UserRole>> {
        let mut roles = Vec::with_capacity(user.role_ids.len());
        for role_id in &user.role_ids {
            if let Some(role) = self.user_roles().find_by_id(role_id)? {
                roles.push(role);
            }
        }
        Ok(roles)
    }

    // -- Role queries --

    /// Look a user role up by name.
    fn find_user_role_by_name(&self, name: &str) -> AppResult<Option<UserRole>> {
        self.user_roles().find_one(&|r: &UserRole| r.name == name)
    }

    /// Access roles attached to a folder.
    fn access_roles_for_folder(&self, folder_id: FolderId) -> AppResult<Vec<AccessRole>> {
        self.access_roles().filter(&|a: &AccessRole| a.folder_id == folder_id)
    }

    /// Access roles granted through a user role.
    fn access_roles_for_role(&self, role_id: UserRoleId) -> AppResult<Vec<AccessRole>> {
        self.access_roles().filter(&|a: &AccessRole| a.user_role_id == role_id)
    }

    /// The access role for a `(folder, user role)` pair, if any.
    fn find_access_role(
        &self,
        folder_id: FolderId,
        role_id: UserRoleId,
    ) -> AppResult<Option<AccessRole>> {
        self.access_roles()
            .find_one(&|a: &AccessRole| a.matches(folder_id, role_id))
    }

    /// Number of folders, used to bound ancestor walks.
    fn folder_count(&self) -> AppResult<u64> {
        self.folders().count()
    }
}
