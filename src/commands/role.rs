//! User role CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppResult;
use docvault_core::types::UserRoleId;
use docvault_entity::user::{CreateUserRole, UpdateUserRole, UserRole, UserRoleDetail};
use docvault_service::{DocumentHub, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for role commands
#[derive(Debug, Args)]
pub struct RoleArgs {
    /// Role subcommand
    #[command(subcommand)]
    pub command: RoleCommand,
}

/// Role subcommands
#[derive(Debug, Subcommand)]
pub enum RoleCommand {
    /// Create a user role
    Create {
        /// Role name
        name: String,
    },
    /// List user roles with their grant counts
    List,
    /// Show a user role
    Show {
        /// User role ID
        role_id: UserRoleId,
    },
    /// Rename a user role
    Rename {
        /// User role ID
        role_id: UserRoleId,
        /// New name
        name: String,
    },
    /// Delete a user role together with its grants and assignments
    Delete {
        /// User role ID
        role_id: UserRoleId,
    },
}

impl RoleCommand {
    /// Whether the subcommand changes the store.
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::List | Self::Show { .. })
    }
}

/// Role display row
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role ID
    id: String,
    /// Name
    name: String,
    /// Number of folder grants
    grants: usize,
    /// Created at
    created_at: String,
}

impl RoleRow {
    fn new(role: &UserRole, grants: usize) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name.clone(),
            grants,
            created_at: role.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

impl From<&UserRoleDetail> for RoleRow {
    fn from(detail: &UserRoleDetail) -> Self {
        Self::new(&detail.role, detail.access_roles.len())
    }
}

/// Execute role commands
pub async fn execute(
    args: &RoleArgs,
    hub: &DocumentHub,
    ctx: &RequestContext,
    format: OutputFormat,
) -> AppResult<()> {
    let roles = hub.roles();
    match &args.command {
        RoleCommand::Create { name } => {
            let role = roles
                .create_user_role(ctx, CreateUserRole { name: name.clone() })
                .await?;
            output::print_item(RoleRow::new(&role, 0), &role, format);
        }
        RoleCommand::List => {
            let list = roles.list_user_roles(ctx).await?;
            let rows: Vec<RoleRow> = list.iter().map(RoleRow::from).collect();
            output::print_list(&rows, &list, format);
        }
        RoleCommand::Show { role_id } => {
            let detail = roles.get_user_role(ctx, *role_id).await?;
            output::print_item(RoleRow::from(&detail), &detail, format);
        }
        RoleCommand::Rename { role_id, name } => {
            let patch = UpdateUserRole {
                name: Some(name.clone()),
            };
            let role = roles.update_user_role(ctx, *role_id, patch).await?;
            output::print_success(&format!("User role {} renamed to '{}'", role.id, role.name));
        }
        RoleCommand::Delete { role_id } => {
            roles.delete_user_role(ctx, *role_id).await?;
            output::print_success(&format!("User role {role_id} deleted"));
        }
    }

    Ok(())
}
