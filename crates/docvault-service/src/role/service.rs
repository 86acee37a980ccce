//! Admin operations on user roles and access roles.

use chrono::Utc;
use tracing::info;

use docvault_auth::require_admin;
use docvault_core::types::{AccessRoleId, UserId, UserRoleId};
use docvault_core::{AppResult, ErrorCode};
use docvault_database::{EntityStore, MemoryStore};
use docvault_entity::access::{AccessRole, CreateAccessRole, DocumentAction, UpdateAccessRole};
use docvault_entity::sanitize::{prepare_name, prepare_optional};
use docvault_entity::user::{CreateUserRole, UpdateUserRole, UserProfile, UserRole, UserRoleDetail};

use crate::context::{RequestContext, load_actor};
use crate::coordinator::SharedStore;

use super::assignment;

/// Manages user roles, their assignment to users, and access roles.
///
/// Every operation is restricted to administrators.
#[derive(Debug)]
pub struct RoleService<S: EntityStore = MemoryStore> {
    store: SharedStore<S>,
}

impl<S: EntityStore> RoleService<S> {
    /// Creates a new role service.
    pub fn new(store: SharedStore<S>) -> Self {
        Self { store }
    }

    // -- User roles --

    /// Creates a user role with a globally unique name.
    pub async fn create_user_role(
        &self,
        ctx: &RequestContext,
        req: CreateUserRole,
    ) -> AppResult<UserRole> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        let name = prepare_name(&req.name);
        if name.is_empty() {
            return Err(ErrorCode::RequiredUserRoleName.into());
        }
        if store.find_user_role_by_name(&name)?.is_some() {
            return Err(ErrorCode::UserRoleAlreadyExists.into());
        }

        let now = Utc::now();
        let role = store.user_roles_mut().create(UserRole {
            id: UserRoleId::new(),
            name,
            created_at: now,
            updated_at: now,
        })?;

        info!(user_id = %ctx.user_id, user_role_id = %role.id, name = %role.name, "User role created");
        Ok(role)
    }

    /// Gets a user role with the access roles it grants.
    pub async fn get_user_role(
        &self,
        ctx: &RequestContext,
        role_id: UserRoleId,
    ) -> AppResult<UserRoleDetail> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        let role = assignment::existing_user_role(&*store, Some(role_id))?;
        Ok(UserRoleDetail {
            access_roles: store.access_roles_for_role(role.id)?,
            role,
        })
    }

    /// Lists every user role with its access roles.
    pub async fn list_user_roles(&self, ctx: &RequestContext) -> AppResult<Vec<UserRoleDetail>> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        store
            .user_roles()
            .find_all()?
            .into_iter()
            .map(|role| -> AppResult<UserRoleDetail> {
                Ok(UserRoleDetail {
                    access_roles: store.access_roles_for_role(role.id)?,
                    role,
                })
            })
            .collect()
    }

    /// Renames a user role. An absent or blank name keeps the old one.
    pub async fn update_user_role(
        &self,
        ctx: &RequestContext,
        role_id: UserRoleId,
        patch: UpdateUserRole,
    ) -> AppResult<UserRole> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        let mut role = assignment::existing_user_role(&*store, Some(role_id))?;
        if let Some(name) = prepare_optional(patch.name.as_deref()) {
            if let Some(existing) = store.find_user_role_by_name(&name)? {
                if existing.id != role.id {
                    return Err(ErrorCode::UserRoleAlreadyExists.into());
                }
            }
            role.name = name;
        }
        role.updated_at = Utc::now();
        let role = store.user_roles_mut().update(role)?;

        info!(user_id = %ctx.user_id, user_role_id = %role.id, name = %role.name, "User role updated");
        Ok(role)
    }

    /// Deletes a user role, its access roles and its assignments.
    pub async fn delete_user_role(&self, ctx: &RequestContext, role_id: UserRoleId) -> AppResult<()> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        let role = assignment::delete_user_role(&mut *store, role_id)?;
        info!(user_id = %ctx.user_id, user_role_id = %role.id, name = %role.name, "User role deleted");
        Ok(())
    }

    // -- Assignment --

    /// Gives a user a role.
    pub async fn assign_user_role(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        role_id: UserRoleId,
    ) -> AppResult<UserProfile> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        let user = assignment::add_user_role(&mut *store, user_id, role_id)?;
        info!(user_id = %ctx.user_id, target_user_id = %user.id, user_role_id = %role_id, "User role assigned");
        Ok(UserProfile::new(&user, store.roles_of(&user)?))
    }

    /// Takes a role away from a user.
    pub async fn revoke_user_role(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        role_id: UserRoleId,
    ) -> AppResult<UserProfile> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserRoleManage)?;

        let user = assignment::remove_user_role(&mut *store, user_id, role_id)?;
        info!(user_id = %ctx.user_id, target_user_id = %user.id, user_role_id = %role_id, "User role revoked");
        Ok(UserProfile::new(&user, store.roles_of(&user)?))
    }

    // -- Access roles --

    /// Grants a user role a level on a folder.
    pub async fn create_access_role(
        &self,
        ctx: &RequestContext,
        req: CreateAccessRole,
    ) -> AppResult<AccessRole> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::AccessRoleManage)?;

        let grant = assignment::create_access_role(&mut *store, req)?;
        info!(
            user_id = %ctx.user_id,
            access_role_id = %grant.id,
            folder_id = %grant.folder_id,
            user_role_id = %grant.user_role_id,
            level = %grant.access_level,
            "Access role created"
        );
        Ok(grant)
    }

    /// Gets an access role.
    pub async fn get_access_role(
        &self,
        ctx: &RequestContext,
        id: AccessRoleId,
    ) -> AppResult<AccessRole> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::AccessRoleManage)?;

        assignment::existing_access_role(&*store, id)
    }

    /// Partially updates an access role.
    pub async fn update_access_role(
        &self,
        ctx: &RequestContext,
        id: AccessRoleId,
        patch: UpdateAccessRole,
    ) -> AppResult<AccessRole> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::AccessRoleManage)?;

        let grant = assignment::update_access_role(&mut *store, id, patch)?;
        info!(
            user_id = %ctx.user_id,
            access_role_id = %grant.id,
            folder_id = %grant.folder_id,
            level = %grant.access_level,
            "Access role updated"
        );
        Ok(grant)
    }

    /// Deletes an access role.
    pub async fn delete_access_role(&self, ctx: &RequestContext, id: AccessRoleId) -> AppResult<()> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::AccessRoleManage)?;

        let grant = assignment::delete_access_role(&mut *store, id)?;
        info!(user_id = %ctx.user_id, access_role_id = %grant.id, "Access role deleted");
        Ok(())
    }
}
