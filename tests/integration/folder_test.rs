//! Integration tests for folder hierarchy rules.

mod helpers;

use docvault_core::ErrorCode;
use docvault_core::traits::Repository;
use docvault_database::EntityStore;
use docvault_entity::AccessLevel;
use docvault_entity::folder::{CreateFolder, UpdateFolder};

#[tokio::test]
async fn test_duplicate_sibling_name_is_rejected() {
    let app = helpers::TestApp::new().await;
    app.folder(app.root, "docs").await;

    let err = app
        .hub
        .folders()
        .create_folder(
            &app.admin,
            CreateFolder {
                name: "  docs ".into(),
                parent_id: Some(app.root),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::DuplicateName));

    // Same name under another parent is fine.
    let other = app.folder(app.root, "other").await;
    app.folder(other.id, "docs").await;
}

#[tokio::test]
async fn test_create_requires_existing_parent() {
    let app = helpers::TestApp::new().await;
    let folders = app.hub.folders();

    let err = folders
        .create_folder(
            &app.admin,
            CreateFolder {
                name: "orphan".into(),
                parent_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::MissingParent));

    let err = folders
        .create_folder(
            &app.admin,
            CreateFolder {
                name: "orphan".into(),
                parent_id: Some(docvault_core::types::FolderId::new()),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::ParentNotFound));
}

#[tokio::test]
async fn test_admin_floor_cannot_create_folders() {
    let app = helpers::TestApp::new().await;
    let err = app
        .hub
        .folders()
        .create_folder(
            &app.admin,
            CreateFolder {
                name: "docs".into(),
                parent_id: Some(app.root),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_reparent_under_descendant_is_cyclic() {
    let app = helpers::TestApp::new().await;
    let x = app.folder(app.root, "x").await;
    let child = app.folder(x.id, "child").await;
    let grandchild = app.folder(child.id, "grandchild").await;
    app.admin_publisher_on(grandchild.id).await;

    for target in [grandchild.id, child.id, x.id] {
        let err = app
            .hub
            .folders()
            .update_folder(
                &app.admin,
                x.id,
                UpdateFolder {
                    parent_id: Some(target),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorCode::CyclicReference), "target {target}");
    }

    // The hierarchy is unchanged.
    let path = app.hub.folders().folder_breadcrumbs(&app.admin, grandchild.id).await.unwrap();
    assert_eq!(path.display_path(), "/root/x/child/grandchild");
}

#[tokio::test]
async fn test_parent_chains_stay_acyclic_after_moves() {
    let app = helpers::TestApp::new().await;
    let a = app.folder(app.root, "a").await;
    let b = app.folder(app.root, "b").await;
    let c = app.folder(a.id, "c").await;
    app.admin_publisher_on(c.id).await;

    let moves = [(b.id, c.id), (a.id, b.id), (c.id, app.root)];
    for (folder, parent) in moves {
        let _ = app
            .hub
            .folders()
            .update_folder(
                &app.admin,
                folder,
                UpdateFolder {
                    parent_id: Some(parent),
                    ..Default::default()
                },
            )
            .await;
    }

    let store = app.hub.store().read().await;
    let total = store.folder_count().unwrap();
    for folder in store.folders().find_all().unwrap() {
        let mut seen = 0;
        let mut cursor = folder.parent_id;
        while let Some(id) = cursor {
            assert_ne!(id, folder.id, "folder {} revisits itself", folder.name);
            seen += 1;
            assert!(seen <= total);
            cursor = store.folders().find_by_id(&id).unwrap().and_then(|f| f.parent_id);
        }
    }
}

#[tokio::test]
async fn test_delete_non_empty_folder_then_empty_it() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "reports").await;
    app.admin_publisher_on(folder.id).await;
    let file = app.file(&app.admin, folder.id, "q1.pdf").await;

    let err = app.hub.folders().delete_folder(&app.admin, folder.id).await.unwrap_err();
    assert!(err.is(ErrorCode::FolderNotEmpty));

    app.hub.files().delete_file(&app.admin, file.id).await.unwrap();
    app.hub.folders().delete_folder(&app.admin, folder.id).await.unwrap();

    let err = app.hub.folders().delete_folder(&app.admin, folder.id).await.unwrap_err();
    assert!(err.is(ErrorCode::FolderNotFound));
}

#[tokio::test]
async fn test_empty_subfolder_still_blocks_delete() {
    let app = helpers::TestApp::new().await;
    let outer = app.folder(app.root, "outer").await;
    let inner = app.folder(outer.id, "inner").await;

    let err = app.hub.folders().delete_folder(&app.admin, outer.id).await.unwrap_err();
    assert!(err.is(ErrorCode::FolderNotEmpty));

    app.hub.folders().delete_folder(&app.admin, inner.id).await.unwrap();
    app.hub.folders().delete_folder(&app.admin, outer.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_cascades_folder_grants() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "shared").await;
    let role = app.create_role("readers").await;
    app.grant(folder.id, role, AccessLevel::Viewer).await;

    app.hub.folders().delete_folder(&app.admin, folder.id).await.unwrap();

    let detail = app.hub.roles().get_user_role(&app.admin, role).await.unwrap();
    assert!(detail.access_roles.is_empty());
}

#[tokio::test]
async fn test_root_folder_is_immutable() {
    let app = helpers::TestApp::new().await;
    app.admin_publisher_on(app.root).await;

    let err = app
        .hub
        .folders()
        .update_folder(
            &app.admin,
            app.root,
            UpdateFolder {
                name: Some("top".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::RootFolderImmutable));

    let err = app.hub.folders().delete_folder(&app.admin, app.root).await.unwrap_err();
    assert!(err.is(ErrorCode::RootFolderImmutable));
}

#[tokio::test]
async fn test_rename_rechecks_uniqueness() {
    let app = helpers::TestApp::new().await;
    app.folder(app.root, "alpha").await;
    let beta = app.folder(app.root, "beta").await;

    let rename = |name: &str| UpdateFolder {
        name: Some(name.into()),
        ..Default::default()
    };
    let err = app
        .hub
        .folders()
        .update_folder(&app.admin, beta.id, rename("alpha"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::DuplicateName));

    let renamed = app
        .hub
        .folders()
        .update_folder(&app.admin, beta.id, rename("gamma <b>"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "gamma &lt;b&gt;");
    assert_eq!(renamed.parent_id, Some(app.root));
}

#[tokio::test]
async fn test_tree_lists_visible_subfolders() {
    let app = helpers::TestApp::new().await;
    let docs = app.folder(app.root, "docs").await;
    app.folder(docs.id, "drafts").await;
    app.folder(app.root, "archive").await;

    let tree = app.hub.folders().folder_tree(&app.admin, app.root, 5).await.unwrap();
    assert_eq!(tree.name, "root");
    assert_eq!(tree.total_folders(), 4);

    let shallow = app.hub.folders().folder_tree(&app.admin, app.root, 0).await.unwrap();
    assert!(shallow.children.is_empty());
}
