//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use docvault_core::config::seed::SeedConfig;
use docvault_core::config::storage::StorageConfig;
use docvault_core::types::{FolderId, UserRoleId};
use docvault_database::MemoryStore;
use docvault_entity::AccessLevel;
use docvault_entity::access::CreateAccessRole;
use docvault_entity::file::{CreateFile, File};
use docvault_entity::folder::{CreateFolder, Folder};
use docvault_entity::user::{CreateUser, CreateUserRole};
use docvault_service::{DocumentHub, RequestContext};
use docvault_storage::MemoryBlobStore;

/// Test application context
pub struct TestApp {
    /// Seeded coordinator over an in-memory store
    pub hub: DocumentHub,
    /// The seeded administrator
    pub admin: RequestContext,
    /// The seeded root folder
    pub root: FolderId,
}

impl TestApp {
    /// Create a seeded application with the default upload limit
    pub async fn new() -> Self {
        Self::with_storage(StorageConfig::default()).await
    }

    /// Create a seeded application with custom blob settings
    pub async fn with_storage(storage: StorageConfig) -> Self {
        let hub = DocumentHub::new(
            MemoryStore::new(),
            Arc::new(MemoryBlobStore::new()),
            &storage,
        );
        let report = hub
            .seed(&SeedConfig::default())
            .await
            .expect("Failed to seed store");
        let admin = hub
            .authenticate(report.admin_id)
            .await
            .expect("Seeded admin must authenticate");

        Self {
            hub,
            admin,
            root: report.root_folder_id,
        }
    }

    /// Create a user and return its request context
    pub async fn create_user(&self, username: &str, is_admin: bool) -> RequestContext {
        let profile = self
            .hub
            .users()
            .create_user(
                &self.admin,
                CreateUser {
                    username: username.to_string(),
                    display_name: username.to_string(),
                    password: "password123".to_string(),
                    is_admin,
                },
            )
            .await
            .expect("Failed to create user");
        self.hub
            .authenticate(profile.id)
            .await
            .expect("New user must authenticate")
    }

    /// Create a user role
    pub async fn create_role(&self, name: &str) -> UserRoleId {
        self.hub
            .roles()
            .create_user_role(&self.admin, CreateUserRole { name: name.to_string() })
            .await
            .expect("Failed to create user role")
            .id
    }

    /// Grant a role a level on a folder
    pub async fn grant(&self, folder: FolderId, role: UserRoleId, level: AccessLevel) {
        self.hub
            .roles()
            .create_access_role(
                &self.admin,
                CreateAccessRole {
                    folder_id: Some(folder),
                    user_role_id: Some(role),
                    access_level: Some(level),
                },
            )
            .await
            .expect("Failed to create access role");
    }

    /// Give a user a role
    pub async fn assign(&self, user: &RequestContext, role: UserRoleId) {
        self.hub
            .roles()
            .assign_user_role(&self.admin, user.user_id, role)
            .await
            .expect("Failed to assign user role");
    }

    /// Create a folder as the administrator, granting the admin publisher
    /// rights on the parent first when needed
    pub async fn folder(&self, parent: FolderId, name: &str) -> Folder {
        self.admin_publisher_on(parent).await;
        self.hub
            .folders()
            .create_folder(
                &self.admin,
                CreateFolder {
                    name: name.to_string(),
                    parent_id: Some(parent),
                },
            )
            .await
            .expect("Failed to create folder")
    }

    /// Create a draft file as the given user
    pub async fn file(&self, ctx: &RequestContext, folder: FolderId, name: &str) -> File {
        self.hub
            .files()
            .create_file(
                ctx,
                CreateFile {
                    name: name.to_string(),
                    folder_id: Some(folder),
                },
            )
            .await
            .expect("Failed to create file")
    }

    /// Give the administrator `Publisher` on a folder through an "admins" role
    pub async fn admin_publisher_on(&self, folder: FolderId) {
        let level = self
            .hub
            .folders()
            .check_access(&self.admin, folder)
            .await
            .expect("Folder must exist");
        if level == AccessLevel::Publisher {
            return;
        }
        let role = match self
            .hub
            .users()
            .get_user(&self.admin, self.admin.user_id)
            .await
            .expect("Admin must exist")
            .roles
            .iter()
            .find(|r| r.name == "admins")
        {
            Some(role) => role.id,
            None => {
                let role = self.create_role("admins").await;
                self.assign(&self.admin, role).await;
                role
            }
        };
        self.grant(folder, role, AccessLevel::Publisher).await;
    }
}
