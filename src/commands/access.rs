//! Folder grant CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppResult;
use docvault_core::types::{AccessRoleId, FolderId, UserRoleId};
use docvault_entity::AccessLevel;
use docvault_entity::access::{AccessRole, CreateAccessRole, UpdateAccessRole};
use docvault_service::{DocumentHub, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for access commands
#[derive(Debug, Args)]
pub struct AccessArgs {
    /// Access subcommand
    #[command(subcommand)]
    pub command: AccessCommand,
}

/// Access subcommands
#[derive(Debug, Subcommand)]
pub enum AccessCommand {
    /// Grant a role a level on a folder
    Grant {
        /// Folder ID
        #[arg(long)]
        folder: FolderId,
        /// User role ID
        #[arg(long)]
        role: UserRoleId,
        /// Level: none, viewer, uploader or publisher
        #[arg(long)]
        level: AccessLevel,
    },
    /// Show a grant
    Show {
        /// Access role ID
        access_role_id: AccessRoleId,
    },
    /// Change a grant's level
    Update {
        /// Access role ID
        access_role_id: AccessRoleId,
        /// New level
        #[arg(long)]
        level: AccessLevel,
    },
    /// Remove a grant
    Revoke {
        /// Access role ID
        access_role_id: AccessRoleId,
    },
}

impl AccessCommand {
    /// Whether the subcommand changes the store.
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::Show { .. })
    }
}

/// Grant display row
#[derive(Debug, Serialize, Tabled)]
struct GrantRow {
    /// Access role ID
    id: String,
    /// Folder ID
    folder_id: String,
    /// User role ID
    user_role_id: String,
    /// Level
    access_level: String,
}

impl From<&AccessRole> for GrantRow {
    fn from(grant: &AccessRole) -> Self {
        Self {
            id: grant.id.to_string(),
            folder_id: grant.folder_id.to_string(),
            user_role_id: grant.user_role_id.to_string(),
            access_level: grant.access_level.to_string(),
        }
    }
}

/// Execute access commands
pub async fn execute(
    args: &AccessArgs,
    hub: &DocumentHub,
    ctx: &RequestContext,
    format: OutputFormat,
) -> AppResult<()> {
    let roles = hub.roles();
    let grant = match &args.command {
        AccessCommand::Grant {
            folder,
            role,
            level,
        } => {
            let req = CreateAccessRole {
                folder_id: Some(*folder),
                user_role_id: Some(*role),
                access_level: Some(*level),
            };
            roles.create_access_role(ctx, req).await?
        }
        AccessCommand::Show { access_role_id } => roles.get_access_role(ctx, *access_role_id).await?,
        AccessCommand::Update {
            access_role_id,
            level,
        } => {
            let patch = UpdateAccessRole {
                access_level: Some(*level),
                ..Default::default()
            };
            roles.update_access_role(ctx, *access_role_id, patch).await?
        }
        AccessCommand::Revoke { access_role_id } => {
            roles.delete_access_role(ctx, *access_role_id).await?;
            output::print_success(&format!("Access role {access_role_id} revoked"));
            return Ok(());
        }
    };

    output::print_item(GrantRow::from(&grant), &grant, format);
    Ok(())
}
