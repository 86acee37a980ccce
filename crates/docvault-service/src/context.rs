//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docvault_core::types::UserId;
use docvault_core::{AppResult, ErrorCode};
use docvault_database::EntityStore;
use docvault_entity::user::User;

/// Context for the current authenticated request.
///
/// Produced by [`crate::DocumentHub::authenticate`] and passed into service
/// methods so that every operation knows *who* is acting. Services reload
/// the user under the store lock, so a context never outlives a deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The username at authentication time.
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            request_time: Utc::now(),
        }
    }

    /// Build a context for a stored user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.username.clone())
    }
}

/// Load the acting user, failing with `Unauthorized` when it no longer
/// exists or has been deleted.
pub(crate) fn load_actor<S>(store: &S, ctx: &RequestContext) -> AppResult<User>
where
    S: EntityStore + ?Sized,
{
    store
        .users()
        .find_by_id(&ctx.user_id)?
        .filter(User::is_active)
        .ok_or_else(|| ErrorCode::Unauthorized.into())
}
