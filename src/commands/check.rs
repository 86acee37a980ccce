//! Access check command.

use clap::Args;
use serde::Serialize;

use docvault_core::AppResult;
use docvault_core::types::FolderId;
use docvault_entity::AccessLevel;
use docvault_service::{DocumentHub, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Folder ID
    pub folder_id: FolderId,
}

#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    username: &'a str,
    folder_id: FolderId,
    access_level: AccessLevel,
}

/// Print the acting user's resolved level on a folder
pub async fn execute(
    args: &CheckArgs,
    hub: &DocumentHub,
    ctx: &RequestContext,
    format: OutputFormat,
) -> AppResult<()> {
    let level = hub.folders().check_access(ctx, args.folder_id).await?;
    match format {
        OutputFormat::Json => output::print_json(&CheckResult {
            username: &ctx.username,
            folder_id: args.folder_id,
            access_level: level,
        }),
        OutputFormat::Table => {
            output::print_kv("User", &ctx.username);
            output::print_kv("Folder", &args.folder_id.to_string());
            output::print_kv("Access level", level.as_str());
        }
    }
    Ok(())
}
