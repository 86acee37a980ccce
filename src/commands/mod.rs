//! CLI command definitions and dispatch.

pub mod access;
pub mod check;
pub mod file;
pub mod folder;
pub mod role;
pub mod seed;
pub mod user;

use clap::{Parser, Subcommand};

use docvault_core::AppResult;
use docvault_core::config::AppConfig;
use docvault_service::{DocumentHub, RequestContext};

use crate::output::OutputFormat;

/// DocVault: folder hierarchy and access control for shared documents
#[derive(Debug, Parser)]
#[command(name = "docvault", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment overlay (`config/<env>.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Configuration directory
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Act as this user (defaults to the seeded administrator)
    #[arg(long = "as", global = true)]
    pub as_user: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the administrator and root folder if missing
    Seed,
    /// User account management
    User(user::UserArgs),
    /// User role management
    Role(role::RoleArgs),
    /// Folder access grants
    Access(access::AccessArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// Print the acting user's access level on a folder
    Check(check::CheckArgs),
}

impl Commands {
    /// Whether the command can change the store.
    pub fn mutates(&self) -> bool {
        match self {
            Self::Seed | Self::Check(_) => false,
            Self::User(args) => args.command.mutates(),
            Self::Role(args) => args.command.mutates(),
            Self::Access(args) => args.command.mutates(),
            Self::Folder(args) => args.command.mutates(),
            Self::File(args) => args.command.mutates(),
        }
    }
}

impl Cli {
    /// Execute the CLI command against a seeded hub.
    pub async fn execute(&self, hub: &DocumentHub, config: &AppConfig) -> AppResult<()> {
        let command = match &self.command {
            Commands::Seed => return seed::execute(hub, &config.seed, self.format).await,
            command => command,
        };

        let ctx = self.context(hub, config).await?;
        match command {
            Commands::User(args) => user::execute(args, hub, &ctx, self.format).await,
            Commands::Role(args) => role::execute(args, hub, &ctx, self.format).await,
            Commands::Access(args) => access::execute(args, hub, &ctx, self.format).await,
            Commands::Folder(args) => folder::execute(args, hub, &ctx, self.format).await,
            Commands::File(args) => file::execute(args, hub, &ctx, self.format).await,
            Commands::Check(args) => check::execute(args, hub, &ctx, self.format).await,
            Commands::Seed => Ok(()),
        }
    }

    async fn context(&self, hub: &DocumentHub, config: &AppConfig) -> AppResult<RequestContext> {
        let username = self
            .as_user
            .as_deref()
            .unwrap_or(&config.seed.admin_username);
        hub.context_for(username).await
    }
}
