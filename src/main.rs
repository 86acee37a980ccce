//! DocVault command-line entry point.
//!
//! Loads configuration, opens the snapshot store, seeds it and dispatches
//! one command. Mutating commands write the snapshot back when autosave is
//! enabled.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use docvault_core::AppResult;
use docvault_core::config::AppConfig;
use docvault_core::config::logging::LoggingConfig;
use docvault_database::{MemoryStore, snapshot};
use docvault_service::DocumentHub;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_from(&cli.config, &cli.env) {
        Ok(c) => c,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);

    if let Err(e) = run(&cli, &config).await {
        tracing::debug!(error = %e, "Command failed");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> AppResult<()> {
    let snapshot_path = config
        .store
        .snapshot_path
        .as_deref()
        .filter(|p| !p.trim().is_empty());

    let store = match snapshot_path {
        Some(path) => snapshot::load(path).await?,
        None => MemoryStore::new(),
    };
    let blobs = docvault_storage::build_blob_store(&config.storage).await?;
    let hub = DocumentHub::new(store, blobs, &config.storage);

    let report = hub.seed(&config.seed).await?;
    let seeded = report.admin_created || report.root_created;

    let result = cli.execute(&hub, config).await;

    if let Some(path) = snapshot_path {
        if config.store.autosave && (seeded || cli.command.mutates()) {
            hub.save_snapshot(path).await?;
            tracing::debug!(path, "Snapshot written");
        }
    }

    result
}
