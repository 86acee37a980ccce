//! Integration tests for accounts, login and authentication.

mod helpers;

use docvault_core::ErrorCode;
use docvault_core::types::UserId;
use docvault_entity::AccessLevel;
use docvault_entity::user::{CreateUser, UpdateUser};

#[tokio::test]
async fn test_login_with_seeded_admin() {
    let app = helpers::TestApp::new().await;
    let profile = app.hub.login("admin", "password").await.unwrap();
    assert!(profile.is_admin);
    assert_eq!(profile.id, app.admin.user_id);

    let err = app.hub.login("admin", "wrong").await.unwrap_err();
    assert!(err.is(ErrorCode::IncorrectPassword));
    let err = app.hub.login("", "password").await.unwrap_err();
    assert!(err.is(ErrorCode::RequiredUsername));
}

#[tokio::test]
async fn test_unknown_user_is_unauthorized() {
    let app = helpers::TestApp::new().await;
    let err = app.hub.authenticate(UserId::new()).await.unwrap_err();
    assert!(err.is(ErrorCode::Unauthorized));
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = helpers::TestApp::new().await;
    let users = app.hub.users();
    let base = CreateUser {
        username: "lee".into(),
        display_name: "Lee".into(),
        password: "pw".into(),
        is_admin: false,
    };

    let cases = [
        (CreateUser { username: "  ".into(), ..base.clone() }, ErrorCode::RequiredUsername),
        (CreateUser { display_name: String::new(), ..base.clone() }, ErrorCode::RequiredDisplayName),
        (CreateUser { password: String::new(), ..base.clone() }, ErrorCode::RequiredPassword),
    ];
    for (req, code) in cases {
        let err = users.create_user(&app.admin, req).await.unwrap_err();
        assert!(err.is(code), "expected {code:?}, got {err}");
    }

    let profile = users.create_user(&app.admin, base).await.unwrap();
    assert_eq!(profile.display_name, "Lee");
    assert!(profile.roles.is_empty());
}

#[tokio::test]
async fn test_deleted_user_loses_access() {
    let app = helpers::TestApp::new().await;
    let folder = app.folder(app.root, "private").await;
    let role = app.create_role("private-role").await;
    app.grant(folder.id, role, AccessLevel::Publisher).await;
    let user = app.create_user("mia", false).await;
    app.assign(&user, role).await;

    app.hub.users().delete_user(&app.admin, user.user_id).await.unwrap();

    let err = app.hub.folders().check_access(&user, folder.id).await.unwrap_err();
    assert!(err.is(ErrorCode::Unauthorized));
    let err = app.hub.login("mia", "password123").await.unwrap_err();
    assert!(err.is(ErrorCode::UserNotFound));
    let err = app.hub.users().get_user(&app.admin, user.user_id).await.unwrap_err();
    assert!(err.is(ErrorCode::UserNotFound));

    // The role survives, the assignment does not.
    let detail = app.hub.roles().get_user_role(&app.admin, role).await.unwrap();
    assert_eq!(detail.access_roles.len(), 1);

    let profile = app.hub.users().reactivate_user(&app.admin, "mia").await.unwrap();
    assert!(profile.roles.is_empty());
    let ctx = app.hub.authenticate(profile.id).await.unwrap();
    assert_eq!(
        app.hub.folders().check_access(&ctx, folder.id).await.unwrap(),
        AccessLevel::None
    );
}

#[tokio::test]
async fn test_reactivate_unknown_or_active_user() {
    let app = helpers::TestApp::new().await;
    app.create_user("ned", false).await;

    let err = app.hub.users().reactivate_user(&app.admin, "ghost").await.unwrap_err();
    assert!(err.is(ErrorCode::UserNotFound));
    let err = app.hub.users().reactivate_user(&app.admin, "ned").await.unwrap_err();
    assert!(err.is(ErrorCode::UserAlreadyActive));
}

#[tokio::test]
async fn test_admin_renames_user() {
    let app = helpers::TestApp::new().await;
    let olga = app.create_user("olga", false).await;
    app.create_user("pete", false).await;

    let rename = |username: &str| UpdateUser {
        username: Some(username.into()),
        ..Default::default()
    };
    let err = app
        .hub
        .users()
        .update_user(&app.admin, olga.user_id, rename("pete"))
        .await
        .unwrap_err();
    assert!(err.is(ErrorCode::UserAlreadyExists));

    let profile = app
        .hub
        .users()
        .update_user(&app.admin, olga.user_id, rename("olivia"))
        .await
        .unwrap();
    assert_eq!(profile.username, "olivia");
    assert!(!profile.is_admin);
    assert!(app.hub.login("olivia", "password123").await.is_ok());
}

#[tokio::test]
async fn test_any_user_can_read_profiles() {
    let app = helpers::TestApp::new().await;
    let quinn = app.create_user("quinn", false).await;

    let admin = app.hub.users().get_user(&quinn, app.admin.user_id).await.unwrap();
    assert_eq!(admin.username, "admin");

    let err = app.hub.users().list_users(&quinn).await.unwrap_err();
    assert!(err.is(ErrorCode::Forbidden));
    let err = app.hub.users().get_user(&quinn, UserId::nil()).await.unwrap_err();
    assert!(err.is(ErrorCode::RequiredUserId));
}
