//! Integration tests for file records, drafts and payloads.

mod helpers;

use bytes::Bytes;

use docvault_core::ErrorCode;
use docvault_core::config::storage::StorageConfig;
use docvault_core::types::FileId;
use docvault_entity::AccessLevel;
use docvault_entity::file::{CreateFile, UpdateFile};

fn publish() -> UpdateFile {
    UpdateFile {
        is_published: Some(true),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_uploader_can_create_but_not_update() {
    let app = helpers::TestApp::new().await;
    let root_child = app.folder(app.root, "inbox").await;
    let editors = app.create_role("editors").await;
    app.grant(root_child.id, editors, AccessLevel::Uploader).await;
    let alice = app.create_user("alice", false).await;
    app.assign(&alice, editors).await;

    let file = app.file(&alice, root_child.id, "notes.txt").await;
    assert!(file.is_draft());
    assert_eq!(file.last_editor_id, alice.user_id);

    let err = app
        .hub
        .files()
        .update_file(
            &alice,
            file.id,
            UpdateFile {
                name: Some("renamed.txt".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_viewer_cannot_create_files() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "public").await;
    let readers = app.create_role("readers").await;
    app.grant(folder.id, readers, AccessLevel::Viewer).await;
    let bob = app.create_user("bob", false).await;
    app.assign(&bob, readers).await;

    let err = app
        .hub
        .files()
        .create_file(
            &bob,
            CreateFile {
                name: "x.txt".into(),
                folder_id: Some(folder.id),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_duplicate_file_name_in_folder() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "docs").await;
    app.admin_publisher_on(folder.id).await;
    app.file(&app.admin, folder.id, "a.txt").await;

    let err = app
        .hub
        .files()
        .create_file(
            &app.admin,
            CreateFile {
                name: "a.txt".into(),
                folder_id: Some(folder.id),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::FileAlreadyExists));

    let err = app
        .hub
        .files()
        .create_file(&app.admin, CreateFile::default())
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::RequiredFolderId));
}

#[tokio::test]
async fn test_draft_visibility() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "drafts").await;

    let roles = [
        ("viewers", AccessLevel::Viewer),
        ("uploaders", AccessLevel::Uploader),
        ("publishers", AccessLevel::Publisher),
    ];
    let mut users = Vec::new();
    for (name, level) in roles {
        let role = app.create_role(name).await;
        app.grant(folder.id, role, level).await;
        let user = app.create_user(&format!("{name}-user"), false).await;
        app.assign(&user, role).await;
        users.push(user);
    }
    let [viewer, uploader, publisher] = <[_; 3]>::try_from(users).unwrap();
    let author = app.create_user("author", false).await;
    let uploaders = app.create_role("author-upload").await;
    app.grant(folder.id, uploaders, AccessLevel::Uploader).await;
    app.assign(&author, uploaders).await;

    let draft = app.file(&author, folder.id, "draft.txt").await;
    let files = app.hub.files();

    assert!(files.get_file(&author, draft.id).await.is_ok());
    assert!(files.get_file(&publisher, draft.id).await.is_ok());
    for ctx in [&viewer, &uploader] {
        let err = files.get_file(ctx, draft.id).await.unwrap_err();
        assert!(err.is(ErrorCode::Forbidden));
    }

    // Listings follow the same rule.
    let names = |view: docvault_entity::folder::FolderView| {
        view.contents.files.into_iter().map(|f| f.name).collect::<Vec<_>>()
    };
    let folders = app.hub.folders();
    assert_eq!(names(folders.get_folder(&author, folder.id).await.unwrap()), ["draft.txt"]);
    assert_eq!(names(folders.get_folder(&publisher, folder.id).await.unwrap()), ["draft.txt"]);
    assert!(names(folders.get_folder(&viewer, folder.id).await.unwrap()).is_empty());
    assert!(names(folders.get_folder(&uploader, folder.id).await.unwrap()).is_empty());

    // Once published, a viewer sees it too.
    files.update_file(&publisher, draft.id, publish()).await.unwrap();
    assert!(files.get_file(&viewer, draft.id).await.is_ok());
}

#[tokio::test]
async fn test_unknown_file_is_not_found_before_forbidden() {
    let app = helpers::TestApp::new().await;
    let nobody = app.create_user("nobody", false).await;

    let err = app.hub.files().get_file(&nobody, FileId::new()).await.unwrap_err();
    assert!(err.is(ErrorCode::FileNotFound));
    let err = app.hub.files().get_file(&nobody, FileId::nil()).await.unwrap_err();
    assert!(err.is(ErrorCode::RequiredFileId));
}

#[tokio::test]
async fn test_upload_and_download_payload() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "data").await;
    app.admin_publisher_on(folder.id).await;
    let file = app.file(&app.admin, folder.id, "blob.bin").await;
    let files = app.hub.files();

    let err = files.download_file_data(&app.admin, file.id).await.unwrap_err();
    assert!(err.is(ErrorCode::FileDataNotFound));

    files
        .upload_file_data(&app.admin, file.id, Bytes::from_static(b"hello"))
        .await
        .unwrap();
    let data = files.download_file_data(&app.admin, file.id).await.unwrap();
    assert_eq!(&data[..], b"hello");

    files
        .upload_file_data(&app.admin, file.id, Bytes::from_static(b"bye"))
        .await
        .unwrap();
    let data = files.download_file_data(&app.admin, file.id).await.unwrap();
    assert_eq!(&data[..], b"bye");
}

#[tokio::test]
async fn test_download_needs_viewer_even_for_last_editor() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "drop").await;
    let uploaders = app.create_role("uploaders").await;
    app.grant(folder.id, uploaders, AccessLevel::Uploader).await;
    let erin = app.create_user("erin", false).await;
    app.assign(&erin, uploaders).await;

    let file = app.file(&erin, folder.id, "scan.png").await;
    let files = app.hub.files();
    files
        .upload_file_data(&erin, file.id, Bytes::from_static(b"png"))
        .await
        .unwrap();
    assert_eq!(&files.download_file_data(&erin, file.id).await.unwrap()[..], b"png");

    app.hub
        .roles()
        .revoke_user_role(&app.admin, erin.user_id, uploaders)
        .await
        .unwrap();
    assert_eq!(files.check_access(&erin, file.id).await.unwrap(), AccessLevel::None);

    let err = files.download_file_data(&erin, file.id).await.unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
    // The record itself stays visible to its last editor.
    assert_eq!(files.get_file(&erin, file.id).await.unwrap().id, file.id);
}

#[tokio::test]
async fn test_only_last_editor_uploads() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "shared").await;
    let writers = app.create_role("writers").await;
    app.grant(folder.id, writers, AccessLevel::Publisher).await;
    let carol = app.create_user("carol", false).await;
    let dave = app.create_user("dave", false).await;
    app.assign(&carol, writers).await;
    app.assign(&dave, writers).await;

    let file = app.file(&carol, folder.id, "plan.md").await;
    let err = app
        .hub
        .files()
        .upload_file_data(&dave, file.id, Bytes::from_static(b"x"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));

    // Publishing makes dave the last editor.
    app.hub.files().update_file(&dave, file.id, publish()).await.unwrap();
    app.hub
        .files()
        .upload_file_data(&dave, file.id, Bytes::from_static(b"x"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_size_limit() {
    let storage = StorageConfig {
        max_upload_size_bytes: 4,
        ..Default::default()
    };
    let app = helpers::TestApp::with_storage(storage).await;
    let folder = app.folder(app.root, "small").await;
    app.admin_publisher_on(folder.id).await;
    let file = app.file(&app.admin, folder.id, "tiny").await;

    let err = app
        .hub
        .files()
        .upload_file_data(&app.admin, file.id, Bytes::from_static(b"12345"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::UploadTooLarge));
    app.hub
        .files()
        .upload_file_data(&app.admin, file.id, Bytes::from_static(b"1234"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_move_requires_publisher_on_destination() {
    let app = helpers::TestApp::new().await;
    let from = app.folder(app.root, "from").await;
    let to = app.folder(app.root, "to").await;
    let movers = app.create_role("movers").await;
    app.grant(from.id, movers, AccessLevel::Publisher).await;
    let erin = app.create_user("erin", false).await;
    app.assign(&erin, movers).await;
    let file = app.file(&erin, from.id, "report.pdf").await;

    let relocate = UpdateFile {
        folder_id: Some(to.id),
        ..Default::default()
    };
    let err = app
        .hub
        .files()
        .update_file(&erin, file.id, relocate.clone())
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));

    app.grant(to.id, movers, AccessLevel::Publisher).await;
    let moved = app.hub.files().update_file(&erin, file.id, relocate).await.unwrap();
    assert_eq!(moved.folder_id, to.id);
}

#[tokio::test]
async fn test_delete_file_twice() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "trash").await;
    app.admin_publisher_on(folder.id).await;
    let file = app.file(&app.admin, folder.id, "old.txt").await;
    app.hub
        .files()
        .upload_file_data(&app.admin, file.id, Bytes::from_static(b"old"))
        .await
        .unwrap();

    app.hub.files().delete_file(&app.admin, file.id).await.unwrap();
    let err = app.hub.files().delete_file(&app.admin, file.id).await.unwrap_err();
    assert!(err.is(ErrorCode::FileNotFound));
}
