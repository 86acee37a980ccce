//! Access role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::traits::Entity;
use docvault_core::types::{AccessRoleId, FolderId, UserRoleId};

use super::level::AccessLevel;

/// A grant tying one user role to one folder at one access level.
///
/// At most one access role exists per `(folder_id, user_role_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRole {
    /// Unique access role identifier.
    pub id: AccessRoleId,
    /// The folder this grant applies to.
    pub folder_id: FolderId,
    /// The user role holding the grant.
    pub user_role_id: UserRoleId,
    /// The granted level. Never `Unset`.
    pub access_level: AccessLevel,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
    /// When the grant was last updated.
    pub updated_at: DateTime<Utc>,
}

impl AccessRole {
    /// Check whether this grant targets the given pair.
    pub fn matches(&self, folder_id: FolderId, user_role_id: UserRoleId) -> bool {
        self.folder_id == folder_id && self.user_role_id == user_role_id
    }
}

impl Entity for AccessRole {
    type Id = AccessRoleId;
    const KIND: &'static str = "access_role";

    fn id(&self) -> AccessRoleId {
        self.id
    }
}

/// Data required to create a new access role.
///
/// References are optional so that a missing one is reported as the
/// matching `Required...` error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAccessRole {
    /// Target folder.
    pub folder_id: Option<FolderId>,
    /// Grantee role.
    pub user_role_id: Option<UserRoleId>,
    /// Granted level.
    pub access_level: Option<AccessLevel>,
}

/// Partial update for an access role. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccessRole {
    /// New target folder.
    pub folder_id: Option<FolderId>,
    /// New grantee role.
    pub user_role_id: Option<UserRoleId>,
    /// New level. `Some(Unset)` is treated like `None`.
    pub access_level: Option<AccessLevel>,
}
