//! The coordinator that wires the store, the blob store and the services.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use docvault_auth::PasswordHasher;
use docvault_core::config::seed::SeedConfig;
use docvault_core::config::storage::StorageConfig;
use docvault_core::traits::BlobStore;
use docvault_core::types::{FolderId, UserId};
use docvault_core::{AppResult, ErrorCode};
use docvault_database::{EntityStore, MemoryStore, snapshot};
use docvault_entity::folder::Folder;
use docvault_entity::sanitize::prepare_name;
use docvault_entity::user::{CreateUser, UserProfile};

use crate::context::RequestContext;
use crate::coordinator::SharedStore;
use crate::file::FileService;
use crate::folder::FolderService;
use crate::role::RoleService;
use crate::user::UserService;
use crate::user::service::insert_user;

/// Outcome of [`DocumentHub::seed`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    /// Whether the administrator account was created by this call.
    pub admin_created: bool,
    /// Whether the root folder was created by this call.
    pub root_created: bool,
    /// The administrator's id.
    pub admin_id: UserId,
    /// The root folder's id.
    pub root_folder_id: FolderId,
}

/// Owns the lock-guarded store and hands out the services.
///
/// Every service shares the same [`SharedStore`], so all of them serialize
/// on one global read/write lock.
#[derive(Debug)]
pub struct DocumentHub<S: EntityStore = MemoryStore> {
    store: SharedStore<S>,
    hasher: Arc<PasswordHasher>,
    folders: FolderService<S>,
    files: FileService<S>,
    users: UserService<S>,
    roles: RoleService<S>,
}

impl<S: EntityStore> DocumentHub<S> {
    /// Build a hub over an existing store.
    pub fn new(store: S, blobs: Arc<dyn BlobStore>, storage: &StorageConfig) -> Self {
        let store = SharedStore::new(store);
        let hasher = Arc::new(PasswordHasher::new());
        Self {
            folders: FolderService::new(store.clone()),
            files: FileService::new(store.clone(), blobs, storage.max_upload_size_bytes),
            users: UserService::new(store.clone(), Arc::clone(&hasher)),
            roles: RoleService::new(store.clone()),
            hasher,
            store,
        }
    }

    /// Folder operations.
    pub fn folders(&self) -> &FolderService<S> {
        &self.folders
    }

    /// File operations.
    pub fn files(&self) -> &FileService<S> {
        &self.files
    }

    /// User operations.
    pub fn users(&self) -> &UserService<S> {
        &self.users
    }

    /// Role and grant operations.
    pub fn roles(&self) -> &RoleService<S> {
        &self.roles
    }

    /// The shared store handle.
    pub fn store(&self) -> &SharedStore<S> {
        &self.store
    }

    /// Create the administrator and the root folder when they are missing.
    ///
    /// Running it again on a seeded store changes nothing.
    pub async fn seed(&self, config: &SeedConfig) -> AppResult<SeedReport> {
        let mut store = self.store.write().await;

        let username = prepare_name(&config.admin_username);
        let (admin, admin_created) = match store.find_user_by_username(&username)? {
            Some(existing) => (existing, false),
            None => {
                let admin = insert_user(
                    &mut *store,
                    &self.hasher,
                    CreateUser {
                        username,
                        display_name: config.admin_display_name.clone(),
                        password: config.admin_password.clone(),
                        is_admin: true,
                    },
                )?;
                (admin, true)
            }
        };

        let (root, root_created) = match store.root_folder()? {
            Some(existing) => (existing, false),
            None => {
                let name = prepare_name(&config.root_folder_name);
                if name.is_empty() {
                    return Err(ErrorCode::RequiredFolderName.into());
                }
                let now = Utc::now();
                let root = store.folders_mut().create(Folder {
                    id: FolderId::new(),
                    name,
                    parent_id: None,
                    last_editor_id: admin.id,
                    created_at: now,
                    updated_at: now,
                })?;
                (root, true)
            }
        };

        info!(
            admin_id = %admin.id,
            root_folder_id = %root.id,
            admin_created,
            root_created,
            "Store seeded"
        );
        Ok(SeedReport {
            admin_created,
            root_created,
            admin_id: admin.id,
            root_folder_id: root.id,
        })
    }

    /// Id of the root folder, once seeded.
    pub async fn root_folder_id(&self) -> AppResult<FolderId> {
        let store = self.store.read().await;
        let root = store.root_folder()?.ok_or(ErrorCode::FolderNotFound)?;
        Ok(root.id)
    }

    /// Resolve an authenticated user id into a request context.
    pub async fn authenticate(&self, user_id: UserId) -> AppResult<RequestContext> {
        self.users.authenticate(user_id).await
    }

    /// Check credentials and return the matching profile.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<UserProfile> {
        self.users.login(username, password).await
    }

    /// Request context for a username, used by trusted local callers.
    pub async fn context_for(&self, username: &str) -> AppResult<RequestContext> {
        self.users.authenticate_username(username).await
    }
}

impl DocumentHub<MemoryStore> {
    /// Write the current store to a snapshot file under the shared lock.
    pub async fn save_snapshot(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let store = self.store.read().await;
        snapshot::save(&store, path).await
    }
}
