//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_core::AppResult;
use docvault_core::types::FolderId;
use docvault_entity::folder::{CreateFolder, Folder, FolderNode, UpdateFolder};
use docvault_service::{DocumentHub, RequestContext};

use super::file::FileRow;
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a new folder
    Create {
        /// Parent folder ID
        #[arg(short, long)]
        parent: FolderId,
        /// Folder name
        name: String,
    },
    /// Show a folder with its visible contents
    Show {
        /// Folder ID (defaults to the root)
        folder_id: Option<FolderId>,
    },
    /// Print the path from the root to a folder
    Path {
        /// Folder ID
        folder_id: FolderId,
    },
    /// Show the visible folder tree
    Tree {
        /// Folder ID (defaults to the root)
        folder_id: Option<FolderId>,
        /// Max depth
        #[arg(short, long, default_value = "3")]
        depth: u32,
    },
    /// Move a folder under a new parent
    Move {
        /// Folder ID
        folder_id: FolderId,
        /// New parent folder ID
        #[arg(short, long)]
        parent: FolderId,
    },
    /// Rename a folder
    Rename {
        /// Folder ID
        folder_id: FolderId,
        /// New name
        name: String,
    },
    /// Delete an empty folder
    Delete {
        /// Folder ID
        folder_id: FolderId,
    },
}

impl FolderCommand {
    /// Whether the subcommand changes the store.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Create { .. } | Self::Move { .. } | Self::Rename { .. } | Self::Delete { .. }
        )
    }
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Parent folder ID
    parent_id: String,
    /// Updated at
    updated_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.to_string(),
            name: folder.name.clone(),
            parent_id: folder.parent_id.map(|p| p.to_string()).unwrap_or_default(),
            updated_at: folder.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    hub: &DocumentHub,
    ctx: &RequestContext,
    format: OutputFormat,
) -> AppResult<()> {
    let folders = hub.folders();
    match &args.command {
        FolderCommand::Create { parent, name } => {
            let req = CreateFolder {
                name: name.clone(),
                parent_id: Some(*parent),
            };
            let folder = folders.create_folder(ctx, req).await?;
            output::print_item(FolderRow::from(&folder), &folder, format);
        }
        FolderCommand::Show { folder_id } => {
            let folder_id = match folder_id {
                Some(id) => *id,
                None => hub.root_folder_id().await?,
            };
            let view = folders.get_folder(ctx, folder_id).await?;
            if format == OutputFormat::Json {
                output::print_json(&view);
                return Ok(());
            }
            let contents = &view.contents;
            output::print_kv("Folder", &contents.folder.name);
            output::print_kv("ID", &contents.folder.id.to_string());
            output::print_kv("Access level", view.access_level.as_str());
            output::print_kv("Grants", &contents.access_roles.len().to_string());
            println!();
            let rows: Vec<FolderRow> = contents.child_folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, &contents.child_folders, format);
            let rows: Vec<FileRow> = contents.files.iter().map(FileRow::from).collect();
            output::print_list(&rows, &contents.files, format);
        }
        FolderCommand::Path { folder_id } => {
            let path = folders.folder_breadcrumbs(ctx, *folder_id).await?;
            match format {
                OutputFormat::Json => output::print_json(&path),
                OutputFormat::Table => println!("{}", path.display_path()),
            }
        }
        FolderCommand::Tree { folder_id, depth } => {
            let folder_id = match folder_id {
                Some(id) => *id,
                None => hub.root_folder_id().await?,
            };
            let tree = folders.folder_tree(ctx, folder_id, *depth).await?;
            match format {
                OutputFormat::Json => output::print_json(&tree),
                OutputFormat::Table => {
                    println!("{}/ [{}]", tree.name, tree.access_level);
                    print_children(&tree, 1);
                }
            }
        }
        FolderCommand::Move { folder_id, parent } => {
            let patch = UpdateFolder {
                parent_id: Some(*parent),
                ..Default::default()
            };
            let folder = folders.update_folder(ctx, *folder_id, patch).await?;
            output::print_item(FolderRow::from(&folder), &folder, format);
        }
        FolderCommand::Rename { folder_id, name } => {
            let patch = UpdateFolder {
                name: Some(name.clone()),
                ..Default::default()
            };
            let folder = folders.update_folder(ctx, *folder_id, patch).await?;
            output::print_item(FolderRow::from(&folder), &folder, format);
        }
        FolderCommand::Delete { folder_id } => {
            folders.delete_folder(ctx, *folder_id).await?;
            output::print_success(&format!("Folder {folder_id} deleted"));
        }
    }

    Ok(())
}

fn print_children(node: &FolderNode, level: usize) {
    for child in &node.children {
        let indent = "  ".repeat(level);
        println!(
            "{indent}├── {}/ [{}, {} files]",
            child.name, child.access_level, child.file_count
        );
        print_children(child, level + 1);
    }
}
