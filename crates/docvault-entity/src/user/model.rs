//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::traits::Entity;
use docvault_core::types::{UserId, UserRoleId};

use super::role::UserRole;

/// A registered user in the DocVault system.
///
/// The stored record keeps the credential hash; anything handed back to a
/// caller goes through [`UserProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// Admins hold at least Viewer on every folder and manage roles.
    pub is_admin: bool,
    /// User roles held by this user, in assignment order.
    #[serde(default)]
    pub role_ids: Vec<UserRoleId>,
    /// Tombstone set when the account is deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the account has not been deleted.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Check if the user currently holds a role.
    pub fn holds_role(&self, role_id: UserRoleId) -> bool {
        self.role_ids.contains(&role_id)
    }
}

impl Entity for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Grant the admin flag.
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update of a user. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New username.
    pub username: Option<String>,
    /// New display name.
    pub display_name: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Public view of a user together with the roles it holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Held roles.
    pub roles: Vec<UserRole>,
    /// Whether the account is deleted.
    pub is_deleted: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Build a profile from a stored user and its resolved roles.
    pub fn new(user: &User, roles: Vec<UserRole>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            is_admin: user.is_admin,
            roles,
            is_deleted: !user.is_active(),
            created_at: user.created_at,
        }
    }
}
