//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppResult;
use docvault_core::types::{UserId, UserRoleId};
use docvault_entity::user::{CreateUser, UpdateUser, UserProfile};
use docvault_service::{DocumentHub, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Username
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name (defaults to the username)
        #[arg(short, long)]
        display_name: Option<String>,
        /// Grant the admin flag
        #[arg(long)]
        admin: bool,
    },
    /// List active users
    List,
    /// Show a user
    Show {
        /// User ID
        user_id: UserId,
    },
    /// Change a user's name or password
    Update {
        /// User ID
        user_id: UserId,
        /// New username
        #[arg(short, long)]
        username: Option<String>,
        /// New display name
        #[arg(short, long)]
        display_name: Option<String>,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User ID
        user_id: UserId,
    },
    /// Reactivate a deleted user
    Reactivate {
        /// Username
        username: String,
    },
    /// Verify a username and password
    Login {
        /// Username
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Give a user a role
    Grant {
        /// User ID
        user_id: UserId,
        /// User role ID
        role_id: UserRoleId,
    },
    /// Take a role away from a user
    Revoke {
        /// User ID
        user_id: UserId,
        /// User role ID
        role_id: UserRoleId,
    },
}

impl UserCommand {
    /// Whether the subcommand changes the store.
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::List | Self::Show { .. } | Self::Login { .. })
    }
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Display name
    display_name: String,
    /// Admin flag
    admin: bool,
    /// Held roles
    roles: String,
    /// Created at
    created_at: String,
}

impl From<&UserProfile> for UserRow {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            admin: user.is_admin,
            roles: user
                .roles
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            created_at: user.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    hub: &DocumentHub,
    ctx: &RequestContext,
    format: OutputFormat,
) -> AppResult<()> {
    let users = hub.users();
    match &args.command {
        UserCommand::Create {
            username,
            password,
            display_name,
            admin,
        } => {
            let user = users
                .create_user(
                    ctx,
                    CreateUser {
                        username: username.clone(),
                        display_name: display_name.clone().unwrap_or_else(|| username.clone()),
                        password: password.clone(),
                        is_admin: *admin,
                    },
                )
                .await?;
            output::print_item(UserRow::from(&user), &user, format);
        }
        UserCommand::List => {
            let list = users.list_users(ctx).await?;
            let rows: Vec<UserRow> = list.iter().map(UserRow::from).collect();
            output::print_list(&rows, &list, format);
        }
        UserCommand::Show { user_id } => {
            let user = users.get_user(ctx, *user_id).await?;
            output::print_item(UserRow::from(&user), &user, format);
        }
        UserCommand::Update {
            user_id,
            username,
            display_name,
            password,
        } => {
            let patch = UpdateUser {
                username: username.clone(),
                display_name: display_name.clone(),
                password: password.clone(),
            };
            let user = users.update_user(ctx, *user_id, patch).await?;
            output::print_item(UserRow::from(&user), &user, format);
        }
        UserCommand::Delete { user_id } => {
            users.delete_user(ctx, *user_id).await?;
            output::print_success(&format!("User {user_id} deleted"));
        }
        UserCommand::Reactivate { username } => {
            let user = users.reactivate_user(ctx, username).await?;
            output::print_item(UserRow::from(&user), &user, format);
        }
        UserCommand::Login { username, password } => {
            let user = hub.login(username, password).await?;
            output::print_success(&format!("Credentials valid for '{}'", user.username));
        }
        UserCommand::Grant { user_id, role_id } => {
            let user = hub.roles().assign_user_role(ctx, *user_id, *role_id).await?;
            output::print_item(UserRow::from(&user), &user, format);
        }
        UserCommand::Revoke { user_id, role_id } => {
            let user = hub.roles().revoke_user_role(ctx, *user_id, *role_id).await?;
            output::print_item(UserRow::from(&user), &user, format);
        }
    }

    Ok(())
}
