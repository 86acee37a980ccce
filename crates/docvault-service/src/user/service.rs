//! User account management, login and authentication.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use docvault_auth::{PasswordHasher, require_admin};
use docvault_core::types::UserId;
use docvault_core::{AppResult, ErrorCode};
use docvault_database::{EntityStore, MemoryStore};
use docvault_entity::access::DocumentAction;
use docvault_entity::sanitize::{prepare_name, prepare_optional};
use docvault_entity::user::{CreateUser, UpdateUser, User, UserProfile};

use crate::context::{RequestContext, load_actor};
use crate::coordinator::SharedStore;
use crate::role::assignment::active_user;

/// Manages user accounts.
#[derive(Debug)]
pub struct UserService<S: EntityStore = MemoryStore> {
    store: SharedStore<S>,
    hasher: Arc<PasswordHasher>,
}

impl<S: EntityStore> UserService<S> {
    /// Creates a new user service.
    pub fn new(store: SharedStore<S>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Creates a user account (admin only).
    pub async fn create_user(&self, ctx: &RequestContext, req: CreateUser) -> AppResult<UserProfile> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserManage)?;

        let user = insert_user(&mut *store, &self.hasher, req)?;
        info!(
            user_id = %ctx.user_id,
            created_user_id = %user.id,
            username = %user.username,
            is_admin = user.is_admin,
            "User created"
        );
        Ok(UserProfile::new(&user, Vec::new()))
    }

    /// Gets an active user with its roles.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<UserProfile> {
        let store = self.store.read().await;
        load_actor(&*store, ctx)?;

        let user = active_user(&*store, user_id)?;
        Ok(UserProfile::new(&user, store.roles_of(&user)?))
    }

    /// Lists active users with their roles (admin only).
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<UserProfile>> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserManage)?;

        store
            .users()
            .filter(&|u: &User| u.is_active())?
            .into_iter()
            .map(|user| -> AppResult<UserProfile> {
                let roles = store.roles_of(&user)?;
                Ok(UserProfile::new(&user, roles))
            })
            .collect()
    }

    /// Partially updates a user.
    ///
    /// Non-admins may only change their own password. Admins may also change
    /// username and display name. The admin flag never changes here.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        patch: UpdateUser,
    ) -> AppResult<UserProfile> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        let mut user = active_user(&*store, user_id)?;

        let username = prepare_optional(patch.username.as_deref());
        let display_name = prepare_optional(patch.display_name.as_deref());
        if !actor.is_admin && (actor.id != user.id || username.is_some() || display_name.is_some()) {
            warn!(user_id = %actor.id, target_user_id = %user.id, "User update denied");
            return Err(ErrorCode::Forbidden.into());
        }

        if let Some(username) = username {
            if let Some(existing) = store.find_user_by_username(&username)? {
                if existing.id != user.id {
                    return Err(ErrorCode::UserAlreadyExists.into());
                }
            }
            user.username = username;
        }
        if let Some(display_name) = display_name {
            user.display_name = display_name;
        }
        let password_changed = match patch.password.filter(|p| !p.is_empty()) {
            Some(password) => {
                user.password_hash = self.hasher.hash_password(&password)?;
                true
            }
            None => false,
        };
        user.updated_at = Utc::now();
        let user = store.users_mut().update(user)?;

        info!(user_id = %ctx.user_id, target_user_id = %user.id, password_changed, "User updated");
        Ok(UserProfile::new(&user, store.roles_of(&user)?))
    }

    /// Deletes (tombstones) a user and clears its role assignments.
    ///
    /// The roles themselves survive. A second delete reports `UserNotFound`.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<()> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserManage)?;

        let mut user = active_user(&*store, user_id)?;
        let now = Utc::now();
        user.deleted_at = Some(now);
        user.role_ids.clear();
        user.updated_at = now;
        let user = store.users_mut().update(user)?;

        info!(user_id = %ctx.user_id, deleted_user_id = %user.id, username = %user.username, "User deleted");
        Ok(())
    }

    /// Clears the tombstone of a deleted user, looked up by username.
    pub async fn reactivate_user(&self, ctx: &RequestContext, username: &str) -> AppResult<UserProfile> {
        let mut store = self.store.write().await;
        let actor = load_actor(&*store, ctx)?;
        require_admin(&actor, DocumentAction::UserManage)?;

        let username = prepare_name(username);
        if username.is_empty() {
            return Err(ErrorCode::RequiredUsername.into());
        }
        let mut user = store
            .find_user_by_username(&username)?
            .ok_or(ErrorCode::UserNotFound)?;
        if user.is_active() {
            return Err(ErrorCode::UserAlreadyActive.into());
        }
        user.deleted_at = None;
        user.updated_at = Utc::now();
        let user = store.users_mut().update(user)?;

        info!(user_id = %ctx.user_id, reactivated_user_id = %user.id, username = %user.username, "User reactivated");
        Ok(UserProfile::new(&user, store.roles_of(&user)?))
    }

    /// Checks a username/password pair and returns the matching profile.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<UserProfile> {
        let username = prepare_name(username);
        if username.is_empty() {
            return Err(ErrorCode::RequiredUsername.into());
        }
        if password.is_empty() {
            return Err(ErrorCode::RequiredPassword.into());
        }

        let store = self.store.read().await;
        let user = store
            .find_user_by_username(&username)?
            .filter(User::is_active)
            .ok_or(ErrorCode::UserNotFound)?;
        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(username = %username, "Login failed: incorrect password");
            return Err(ErrorCode::IncorrectPassword.into());
        }

        info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(UserProfile::new(&user, store.roles_of(&user)?))
    }

    /// Turns an externally authenticated user id into a request context.
    ///
    /// Unknown and deleted users are `Unauthorized`.
    pub async fn authenticate(&self, user_id: UserId) -> AppResult<RequestContext> {
        let store = self.store.read().await;
        let user = store
            .users()
            .find_by_id(&user_id)?
            .filter(User::is_active)
            .ok_or(ErrorCode::Unauthorized)?;
        Ok(RequestContext::for_user(&user))
    }

    /// Like [`UserService::authenticate`], keyed by username.
    pub async fn authenticate_username(&self, username: &str) -> AppResult<RequestContext> {
        let store = self.store.read().await;
        let user = store
            .find_user_by_username(&prepare_name(username))?
            .filter(User::is_active)
            .ok_or(ErrorCode::Unauthorized)?;
        Ok(RequestContext::for_user(&user))
    }
}

/// Validate and store a new account. Shared with seeding.
pub(crate) fn insert_user<S>(store: &mut S, hasher: &PasswordHasher, req: CreateUser) -> AppResult<User>
where
    S: EntityStore + ?Sized,
{
    let username = prepare_name(&req.username);
    if username.is_empty() {
        return Err(ErrorCode::RequiredUsername.into());
    }
    let display_name = prepare_name(&req.display_name);
    if display_name.is_empty() {
        return Err(ErrorCode::RequiredDisplayName.into());
    }
    if req.password.is_empty() {
        return Err(ErrorCode::RequiredPassword.into());
    }
    if store.find_user_by_username(&username)?.is_some() {
        return Err(ErrorCode::UserAlreadyExists.into());
    }

    let now = Utc::now();
    store.users_mut().create(User {
        id: UserId::new(),
        username,
        display_name,
        password_hash: hasher.hash_password(&req.password)?,
        is_admin: req.is_admin,
        role_ids: Vec::new(),
        deleted_at: None,
        created_at: now,
        updated_at: now,
    })
}
