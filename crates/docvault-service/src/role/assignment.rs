//! Mutations of the user/role and role/folder relationships.
//!
//! Every function expects the caller to hold the exclusive store lock.

use chrono::Utc;

use docvault_core::types::{AccessRoleId, FolderId, UserId, UserRoleId};
use docvault_core::{AppResult, ErrorCode};
use docvault_database::EntityStore;
use docvault_entity::access::{AccessRole, CreateAccessRole, UpdateAccessRole};
use docvault_entity::user::{User, UserRole};

/// Load a live user, failing with `RequiredUserId` / `UserNotFound`.
pub(crate) fn active_user<S>(store: &S, user_id: UserId) -> AppResult<User>
where
    S: EntityStore + ?Sized,
{
    let user_id = user_id.present().ok_or(ErrorCode::RequiredUserId)?;
    Ok(store
        .users()
        .find_by_id(&user_id)?
        .filter(User::is_active)
        .ok_or(ErrorCode::UserNotFound)?)
}

/// Load a user role, failing with `RequiredUserRoleId` / `UserRoleNotFound`.
pub fn existing_user_role<S>(store: &S, role_id: Option<UserRoleId>) -> AppResult<UserRole>
where
    S: EntityStore + ?Sized,
{
    let role_id = role_id
        .and_then(UserRoleId::present)
        .ok_or(ErrorCode::RequiredUserRoleId)?;
    Ok(store
        .user_roles()
        .find_by_id(&role_id)?
        .ok_or(ErrorCode::UserRoleNotFound)?)
}

fn existing_folder<S>(store: &S, folder_id: Option<FolderId>) -> AppResult<FolderId>
where
    S: EntityStore + ?Sized,
{
    let folder_id = folder_id
        .and_then(FolderId::present)
        .ok_or(ErrorCode::RequiredFolderId)?;
    store
        .folders()
        .find_by_id(&folder_id)?
        .map(|folder| folder.id)
        .ok_or_else(|| ErrorCode::FolderNotFound.into())
}

/// Load an access role, failing with `RequiredAccessRoleId` /
/// `AccessRoleNotFound`.
pub fn existing_access_role<S>(store: &S, id: AccessRoleId) -> AppResult<AccessRole>
where
    S: EntityStore + ?Sized,
{
    let id = id.present().ok_or(ErrorCode::RequiredAccessRoleId)?;
    Ok(store
        .access_roles()
        .find_by_id(&id)?
        .ok_or(ErrorCode::AccessRoleNotFound)?)
}

/// Give `user_id` the role `role_id`.
pub fn add_user_role<S>(store: &mut S, user_id: UserId, role_id: UserRoleId) -> AppResult<User>
where
    S: EntityStore + ?Sized,
{
    let mut user = active_user(store, user_id)?;
    let role = existing_user_role(store, Some(role_id))?;
    if user.holds_role(role.id) {
        return Err(ErrorCode::UserRoleAlreadyAssigned.into());
    }
    user.role_ids.push(role.id);
    user.updated_at = Utc::now();
    store.users_mut().update(user)
}

/// Take the role `role_id` away from `user_id`.
///
/// Takes effect on the very next access resolution.
pub fn remove_user_role<S>(store: &mut S, user_id: UserId, role_id: UserRoleId) -> AppResult<User>
where
    S: EntityStore + ?Sized,
{
    let mut user = active_user(store, user_id)?;
    let role = existing_user_role(store, Some(role_id))?;
    if !user.holds_role(role.id) {
        return Err(ErrorCode::UserRoleNotAssigned.into());
    }
    user.role_ids.retain(|held| *held != role.id);
    user.updated_at = Utc::now();
    store.users_mut().update(user)
}

/// Grant a user role a level on a folder.
///
/// At most one access role may exist per `(folder, user role)` pair.
pub fn create_access_role<S>(store: &mut S, req: CreateAccessRole) -> AppResult<AccessRole>
where
    S: EntityStore + ?Sized,
{
    if req.folder_id.and_then(FolderId::present).is_none() {
        return Err(ErrorCode::RequiredFolderId.into());
    }
    if req.user_role_id.and_then(UserRoleId::present).is_none() {
        return Err(ErrorCode::RequiredUserRoleId.into());
    }
    let access_level = req
        .access_level
        .and_then(|level| level.specified())
        .ok_or(ErrorCode::RequiredAccessLevel)?;

    let folder_id = existing_folder(store, req.folder_id)?;
    let role = existing_user_role(store, req.user_role_id)?;

    let already_granted = store
        .access_roles_for_role(role.id)?
        .iter()
        .any(|grant| grant.folder_id == folder_id);
    if already_granted {
        return Err(ErrorCode::AccessRoleAlreadyExists.into());
    }

    let now = Utc::now();
    store.access_roles_mut().create(AccessRole {
        id: AccessRoleId::new(),
        folder_id,
        user_role_id: role.id,
        access_level,
        created_at: now,
        updated_at: now,
    })
}

/// Partially update an access role.
///
/// Absent fields (and `Unset` for the level) keep their stored values. When
/// the folder or user role changes, existence and pair uniqueness are
/// checked again.
pub fn update_access_role<S>(
    store: &mut S,
    id: AccessRoleId,
    patch: UpdateAccessRole,
) -> AppResult<AccessRole>
where
    S: EntityStore + ?Sized,
{
    let mut grant = existing_access_role(store, id)?;

    let folder_id = patch
        .folder_id
        .and_then(FolderId::present)
        .unwrap_or(grant.folder_id);
    let user_role_id = patch
        .user_role_id
        .and_then(UserRoleId::present)
        .unwrap_or(grant.user_role_id);

    if folder_id != grant.folder_id || user_role_id != grant.user_role_id {
        existing_folder(store, Some(folder_id))?;
        existing_user_role(store, Some(user_role_id))?;
        if let Some(existing) = store.find_access_role(folder_id, user_role_id)? {
            if existing.id != grant.id {
                return Err(ErrorCode::AccessRoleAlreadyExists.into());
            }
        }
    }

    grant.folder_id = folder_id;
    grant.user_role_id = user_role_id;
    if let Some(level) = patch.access_level.and_then(|level| level.specified()) {
        grant.access_level = level;
    }
    grant.updated_at = Utc::now();
    store.access_roles_mut().update(grant)
}

/// Delete an access role. A second delete reports `AccessRoleNotFound`.
pub fn delete_access_role<S>(store: &mut S, id: AccessRoleId) -> AppResult<AccessRole>
where
    S: EntityStore + ?Sized,
{
    let grant = existing_access_role(store, id)?;
    store.access_roles_mut().delete(&grant.id)?;
    Ok(grant)
}

/// Delete every access role attached to a folder. Returns how many went.
pub fn delete_folder_grants<S>(store: &mut S, folder_id: FolderId) -> AppResult<usize>
where
    S: EntityStore + ?Sized,
{
    let grants = store.access_roles_for_folder(folder_id)?;
    for grant in &grants {
        store.access_roles_mut().delete(&grant.id)?;
    }
    Ok(grants.len())
}

/// Delete a user role together with its access roles and its assignments.
pub fn delete_user_role<S>(store: &mut S, role_id: UserRoleId) -> AppResult<UserRole>
where
    S: EntityStore + ?Sized,
{
    let role = existing_user_role(store, Some(role_id))?;

    for grant in store.access_roles_for_role(role.id)? {
        store.access_roles_mut().delete(&grant.id)?;
    }
    let now = Utc::now();
    for mut holder in store.holders_of(role.id)? {
        holder.role_ids.retain(|held| *held != role.id);
        holder.updated_at = now;
        store.users_mut().update(holder)?;
    }
    store.user_roles_mut().delete(&role.id)?;
    Ok(role)
}
