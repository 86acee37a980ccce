//! Seed command.

use docvault_core::AppResult;
use docvault_core::config::seed::SeedConfig;
use docvault_service::DocumentHub;

use crate::output::{self, OutputFormat};

/// Report the seeded administrator and root folder.
pub async fn execute(hub: &DocumentHub, config: &SeedConfig, format: OutputFormat) -> AppResult<()> {
    let report = hub.seed(config).await?;
    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_success("Store seeded");
            output::print_kv("Administrator", &config.admin_username);
            output::print_kv("Administrator ID", &report.admin_id.to_string());
            output::print_kv("Root folder ID", &report.root_folder_id.to_string());
        }
    }
    Ok(())
}
