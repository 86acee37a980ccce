//! Hierarchical reads: ancestor paths and visibility-filtered subtrees.

use docvault_auth::{require_access, resolve_folder_access};
use docvault_core::AppResult;
use docvault_core::types::FolderId;
use docvault_database::EntityStore;
use docvault_entity::access::DocumentAction;
use docvault_entity::folder::{FolderNode, FolderPath, FolderView, PathSegment};
use docvault_entity::user::User;

use crate::context::{RequestContext, load_actor};
use crate::hierarchy;
use crate::visibility::apply_visibility;

use super::service::{FolderService, visible_folder};

impl<S: EntityStore> FolderService<S> {
    /// The chain of folders from the root down to `folder_id`.
    ///
    /// Requires `Viewer` on the folder itself; ancestors are listed by name
    /// only, whatever the caller's level on them.
    pub async fn folder_breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
    ) -> AppResult<FolderPath> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;

        let (folder, level) = resolve_folder_access(&*store, &actor, folder_id)?;
        require_access(&actor, level, DocumentAction::FolderRead)?;

        let segments = hierarchy::ancestors(&*store, &folder)?
            .into_iter()
            .map(|f| PathSegment { id: f.id, name: f.name })
            .collect();
        Ok(FolderPath { segments })
    }

    /// A subtree rooted at `folder_id`, at most `max_depth` levels below it.
    ///
    /// Built from repeated filtered reads, so children the caller resolves
    /// to `None` are omitted together with everything beneath them.
    pub async fn folder_tree(
        &self,
        ctx: &RequestContext,
        folder_id: FolderId,
        max_depth: u32,
    ) -> AppResult<FolderNode> {
        let store = self.store.read().await;
        let actor = load_actor(&*store, ctx)?;

        let view = visible_folder(&*store, &actor, folder_id)?;
        let cap = store.folder_count()?;
        build_node(&*store, &actor, view, u64::from(max_depth).min(cap))
    }
}

fn build_node<S>(store: &S, actor: &User, view: FolderView, depth: u64) -> AppResult<FolderNode>
where
    S: EntityStore + ?Sized,
{
    let mut children = Vec::new();
    if depth > 0 {
        for child in &view.contents.child_folders {
            let Some(contents) = store.folder_contents(child.id)? else {
                continue;
            };
            let (_, level) = resolve_folder_access(store, actor, child.id)?;
            let child_view = apply_visibility(store, actor, contents, level)?;
            children.push(build_node(store, actor, child_view, depth - 1)?);
        }
    }

    Ok(FolderNode {
        id: view.contents.folder.id,
        name: view.contents.folder.name,
        access_level: view.access_level,
        file_count: view.contents.files.len() as u64,
        children,
    })
}
