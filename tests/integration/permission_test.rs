//! Integration tests for access resolution, visibility and grants.

mod helpers;

use docvault_core::ErrorCode;
use docvault_core::types::FolderId;
use docvault_entity::AccessLevel;
use docvault_entity::access::{CreateAccessRole, UpdateAccessRole};
use docvault_entity::user::CreateUserRole;

#[tokio::test]
async fn test_admin_floor_on_every_folder() {
    let app = helpers::TestApp::new().await;
    let a = app.folder(app.root, "a").await;
    let b = app.folder(a.id, "b").await;

    // A second admin holds no roles at all.
    let other_admin = app.create_user("second-admin", true).await;
    for folder in [app.root, a.id, b.id] {
        let level = app.hub.folders().check_access(&other_admin, folder).await.unwrap();
        assert_eq!(level, AccessLevel::Viewer);
    }

    let plain = app.create_user("plain", false).await;
    let level = app.hub.folders().check_access(&plain, b.id).await.unwrap();
    assert_eq!(level, AccessLevel::None);
    let err = app.hub.folders().get_folder(&plain, b.id).await.unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_level_is_max_over_held_roles() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "shared").await;
    let low = app.create_role("low").await;
    let high = app.create_role("high").await;
    let unheld = app.create_role("unheld").await;
    app.grant(folder.id, low, AccessLevel::Viewer).await;
    app.grant(folder.id, high, AccessLevel::Uploader).await;
    app.grant(folder.id, unheld, AccessLevel::Publisher).await;

    let user = app.create_user("frank", false).await;
    app.assign(&user, low).await;
    assert_eq!(
        app.hub.folders().check_access(&user, folder.id).await.unwrap(),
        AccessLevel::Viewer
    );
    app.assign(&user, high).await;
    assert_eq!(
        app.hub.folders().check_access(&user, folder.id).await.unwrap(),
        AccessLevel::Uploader
    );

    // Grants never propagate to subfolders.
    let child = app.folder(folder.id, "child").await;
    assert_eq!(
        app.hub.folders().check_access(&user, child.id).await.unwrap(),
        AccessLevel::None
    );
}

#[tokio::test]
async fn test_revoking_a_role_takes_effect_immediately() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "team").await;
    let role = app.create_role("team").await;
    app.grant(folder.id, role, AccessLevel::Publisher).await;
    let user = app.create_user("gina", false).await;
    app.assign(&user, role).await;
    assert_eq!(
        app.hub.folders().check_access(&user, folder.id).await.unwrap(),
        AccessLevel::Publisher
    );

    app.hub
        .roles()
        .revoke_user_role(&app.admin, user.user_id, role)
        .await
        .unwrap();
    assert_eq!(
        app.hub.folders().check_access(&user, folder.id).await.unwrap(),
        AccessLevel::None
    );
    let err = app
        .hub
        .roles()
        .revoke_user_role(&app.admin, user.user_id, role)
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::UserRoleNotAssigned));
}

#[tokio::test]
async fn test_hidden_child_folders_are_filtered_in_order() {
    let app = helpers::TestApp::new().await;
    let parent = app.folder(app.root, "parent").await;
    let first = app.folder(parent.id, "first").await;
    let hidden = app.folder(parent.id, "hidden").await;
    let last = app.folder(parent.id, "last").await;

    let role = app.create_role("browsers").await;
    for folder in [parent.id, first.id, last.id] {
        app.grant(folder, role, AccessLevel::Viewer).await;
    }
    app.grant(hidden.id, role, AccessLevel::None).await;
    let user = app.create_user("hank", false).await;
    app.assign(&user, role).await;

    let view = app.hub.folders().get_folder(&user, parent.id).await.unwrap();
    assert_eq!(view.access_level, AccessLevel::Viewer);
    let visible: Vec<FolderId> = view.contents.child_folders.iter().map(|f| f.id).collect();
    assert_eq!(visible, [first.id, last.id]);

    // The administrator's floor keeps every child visible.
    let view = app.hub.folders().get_folder(&app.admin, parent.id).await.unwrap();
    assert_eq!(view.contents.child_folders.len(), 3);
}

#[tokio::test]
async fn test_two_children_one_hidden() {
    let app = helpers::TestApp::new().await;
    let parent = app.folder(app.root, "pair").await;
    let a = app.folder(parent.id, "a").await;
    let b = app.folder(parent.id, "b").await;

    let role = app.create_role("pair-readers").await;
    app.grant(parent.id, role, AccessLevel::Viewer).await;
    app.grant(b.id, role, AccessLevel::Viewer).await;
    let user = app.create_user("ivy", false).await;
    app.assign(&user, role).await;

    let view = app.hub.folders().get_folder(&user, parent.id).await.unwrap();
    let ids: Vec<FolderId> = view.contents.child_folders.iter().map(|f| f.id).collect();
    assert_eq!(ids, [b.id]);
    assert!(!ids.contains(&a.id));
}

#[tokio::test]
async fn test_one_access_role_per_folder_and_role() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "unique").await;
    let role = app.create_role("unique-role").await;
    app.grant(folder.id, role, AccessLevel::Viewer).await;

    let err = app
        .hub
        .roles()
        .create_access_role(
            &app.admin,
            CreateAccessRole {
                folder_id: Some(folder.id),
                user_role_id: Some(role),
                access_level: Some(AccessLevel::Publisher),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::AccessRoleAlreadyExists));

    let detail = app.hub.roles().get_user_role(&app.admin, role).await.unwrap();
    assert_eq!(detail.access_roles.len(), 1);
}

#[tokio::test]
async fn test_update_access_role_keeps_unset_fields() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "upd").await;
    let other = app.folder(app.root, "upd-other").await;
    let role = app.create_role("upd-role").await;
    let grant = app
        .hub
        .roles()
        .create_access_role(
            &app.admin,
            CreateAccessRole {
                folder_id: Some(folder.id),
                user_role_id: Some(role),
                access_level: Some(AccessLevel::Uploader),
            },
        )
        .await
        .unwrap();

    let updated = app
        .hub
        .roles()
        .update_access_role(
            &app.admin,
            grant.id,
            UpdateAccessRole {
                access_level: Some(AccessLevel::Unset),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.access_level, AccessLevel::Uploader);

    let moved = app
        .hub
        .roles()
        .update_access_role(
            &app.admin,
            grant.id,
            UpdateAccessRole {
                folder_id: Some(other.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.folder_id, other.id);
    assert_eq!(moved.access_level, AccessLevel::Uploader);
}

#[tokio::test]
async fn test_grant_administration_is_admin_only() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "locked").await;
    let role = app.create_role("locked-role").await;
    app.grant(folder.id, role, AccessLevel::Publisher).await;
    let user = app.create_user("jack", false).await;
    app.assign(&user, role).await;

    let err = app
        .hub
        .roles()
        .create_user_role(&user, CreateUserRole { name: "mine".into() })
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));

    let err = app
        .hub
        .roles()
        .create_access_role(
            &user,
            CreateAccessRole {
                folder_id: Some(folder.id),
                user_role_id: Some(role),
                access_level: Some(AccessLevel::Viewer),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
}

#[tokio::test]
async fn test_deletes_report_not_found_the_second_time() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "gone").await;
    let role = app.create_role("gone-role").await;
    let grant = app
        .hub
        .roles()
        .create_access_role(
            &app.admin,
            CreateAccessRole {
                folder_id: Some(folder.id),
                user_role_id: Some(role),
                access_level: Some(AccessLevel::Viewer),
            },
        )
        .await
        .unwrap();
    let roles = app.hub.roles();

    roles.delete_access_role(&app.admin, grant.id).await.unwrap();
    let err = roles.delete_access_role(&app.admin, grant.id).await.unwrap_err();
    assert!(err.is(ErrorCode::AccessRoleNotFound));

    roles.delete_user_role(&app.admin, role).await.unwrap();
    let err = roles.delete_user_role(&app.admin, role).await.unwrap_err();
    assert!(err.is(ErrorCode::UserRoleNotFound));
}

#[tokio::test]
async fn test_deleting_a_role_cascades() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "cascade").await;
    let role = app.create_role("cascade-role").await;
    app.grant(folder.id, role, AccessLevel::Publisher).await;
    let user = app.create_user("kate", false).await;
    app.assign(&user, role).await;

    app.hub.roles().delete_user_role(&app.admin, role).await.unwrap();

    let profile = app.hub.users().get_user(&app.admin, user.user_id).await.unwrap();
    assert!(profile.roles.is_empty());
    assert_eq!(
        app.hub.folders().check_access(&user, folder.id).await.unwrap(),
        AccessLevel::None
    );
    let view = app.hub.folders().get_folder(&app.admin, folder.id).await.unwrap();
    assert!(view.contents.access_roles.is_empty());
}
