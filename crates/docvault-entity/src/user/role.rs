//! User role entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::traits::Entity;
use docvault_core::types::UserRoleId;

use crate::access::AccessRole;

/// A named, stackable bundle of access roles that can be held by users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    /// Unique role identifier.
    pub id: UserRoleId,
    /// Globally unique role name.
    pub name: String,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Entity for UserRole {
    type Id = UserRoleId;
    const KIND: &'static str = "user_role";

    fn id(&self) -> UserRoleId {
        self.id
    }
}

/// Data required to create a new user role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRole {
    /// Role name.
    pub name: String,
}

/// Partial update of a user role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRole {
    /// New role name.
    pub name: Option<String>,
}

/// A user role with the access roles it grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRoleDetail {
    /// The role itself.
    #[serde(flatten)]
    pub role: UserRole,
    /// Grants held by the role.
    pub access_roles: Vec<AccessRole>,
}
