//! File management CLI commands.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppResult;
use docvault_core::types::{FileId, FolderId};
use docvault_entity::file::{CreateFile, File, UpdateFile};
use docvault_service::{DocumentHub, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// Create a draft file record
    Create {
        /// Folder ID
        #[arg(long)]
        folder: FolderId,
        /// File name
        name: String,
        /// Upload this local file as the payload
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Show a file record
    Show {
        /// File ID
        file_id: FileId,
    },
    /// Publish a draft
    Publish {
        /// File ID
        file_id: FileId,
    },
    /// Turn a published file back into a draft
    Unpublish {
        /// File ID
        file_id: FileId,
    },
    /// Rename or move a file
    Update {
        /// File ID
        file_id: FileId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// Destination folder ID
        #[arg(long)]
        folder: Option<FolderId>,
    },
    /// Delete a file and its payload
    Delete {
        /// File ID
        file_id: FileId,
    },
    /// Replace a file's payload with a local file
    Upload {
        /// File ID
        file_id: FileId,
        /// Local file to read
        path: PathBuf,
    },
    /// Write a file's payload to a local path
    Download {
        /// File ID
        file_id: FileId,
        /// Local destination
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl FileCommand {
    /// Whether the subcommand changes the store.
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::Show { .. } | Self::Download { .. })
    }
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Folder ID
    folder_id: String,
    /// Publish state
    status: &'static str,
    /// Last editor
    last_editor_id: String,
    /// Updated at
    updated_at: String,
}

impl From<&File> for FileRow {
    fn from(file: &File) -> Self {
        Self {
            id: file.id.to_string(),
            name: file.name.clone(),
            folder_id: file.folder_id.to_string(),
            status: if file.is_published { "published" } else { "draft" },
            last_editor_id: file.last_editor_id.to_string(),
            updated_at: file.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FileArgs,
    hub: &DocumentHub,
    ctx: &RequestContext,
    format: OutputFormat,
) -> AppResult<()> {
    let files = hub.files();
    let file = match &args.command {
        FileCommand::Create { folder, name, from } => {
            let req = CreateFile {
                name: name.clone(),
                folder_id: Some(*folder),
            };
            let file = files.create_file(ctx, req).await?;
            if let Some(path) = from {
                files.upload_file_data(ctx, file.id, read_local(path).await?).await?;
            }
            file
        }
        FileCommand::Show { file_id } => files.get_file(ctx, *file_id).await?,
        FileCommand::Publish { file_id } => set_published(hub, ctx, *file_id, true).await?,
        FileCommand::Unpublish { file_id } => set_published(hub, ctx, *file_id, false).await?,
        FileCommand::Update {
            file_id,
            name,
            folder,
        } => {
            let patch = UpdateFile {
                name: name.clone(),
                folder_id: *folder,
                is_published: None,
            };
            files.update_file(ctx, *file_id, patch).await?
        }
        FileCommand::Delete { file_id } => {
            files.delete_file(ctx, *file_id).await?;
            output::print_success(&format!("File {file_id} deleted"));
            return Ok(());
        }
        FileCommand::Upload { file_id, path } => {
            let data = read_local(path).await?;
            let size = data.len();
            files.upload_file_data(ctx, *file_id, data).await?;
            output::print_success(&format!("Uploaded {size} bytes to file {file_id}"));
            return Ok(());
        }
        FileCommand::Download { file_id, output: path } => {
            let data = files.download_file_data(ctx, *file_id).await?;
            tokio::fs::write(path, &data).await?;
            output::print_success(&format!(
                "Wrote {} bytes to {}",
                data.len(),
                path.display()
            ));
            return Ok(());
        }
    };

    output::print_item(FileRow::from(&file), &file, format);
    Ok(())
}

async fn set_published(
    hub: &DocumentHub,
    ctx: &RequestContext,
    file_id: FileId,
    published: bool,
) -> AppResult<File> {
    let patch = UpdateFile {
        is_published: Some(published),
        ..Default::default()
    };
    hub.files().update_file(ctx, file_id, patch).await
}

async fn read_local(path: &Path) -> AppResult<Bytes> {
    Ok(Bytes::from(tokio::fs::read(path).await?))
}
