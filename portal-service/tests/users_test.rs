//! User directory endpoints: listing, profile updates, and the
//! admin-only role channel.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use portal_service::models::Role;

#[tokio::test]
async fn only_admins_can_list_the_directory() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;
    let admin = app.seed_user(Role::Admin).await;

    let (status, _) = app
        .request("GET", "/api/users", Some(&app.token_for(&user)), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request("GET", "/api/users", Some(&app.token_for(&admin)), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn any_authenticated_user_can_fetch_a_profile() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;
    let other = app.seed_user(Role::User).await;

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/users/{}", other.user_id),
            Some(&app.token_for(&user)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], other.email);
    assert_eq!(body["role_code"], "USER");
}

#[tokio::test]
async fn users_can_update_their_own_profile() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/users/{}", user.user_id),
            Some(&app.token_for(&user)),
            Some(serde_json::json!({ "display_name": "New Name" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_name"], "New Name");
}

#[tokio::test]
async fn users_cannot_update_someone_elses_profile() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;
    let victim = app.seed_user(Role::User).await;

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/users/{}", victim.user_id),
            Some(&app.token_for(&user)),
            Some(serde_json::json!({ "display_name": "Hijacked" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn non_admins_cannot_grant_themselves_a_role() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/users/{}", user.user_id),
            Some(&app.token_for(&user)),
            Some(serde_json::json!({ "role": "ADMIN" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admins_can_promote_users() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;
    let admin = app.seed_user(Role::Admin).await;

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/users/{}", user.user_id),
            Some(&app.token_for(&admin)),
            Some(serde_json::json!({ "role": "MODERATOR" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_code"], "MODERATOR");
}

#[tokio::test]
async fn a_promoted_admin_gains_dashboard_access() {
    let app = TestApp::spawn();
    let user = app.seed_user(Role::User).await;
    let admin = app.seed_user(Role::Admin).await;
    let user_token = app.token_for(&user);

    let (status, _) = app
        .request("GET", "/api/admin/dashboard", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.request(
        "PUT",
        &format!("/api/users/{}", user.user_id),
        Some(&app.token_for(&admin)),
        Some(serde_json::json!({ "role": "ADMIN" })),
    )
    .await;

    let (status, _) = app
        .request("GET", "/api/admin/dashboard", Some(&user_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_profiles_are_not_found() {
    let app = TestApp::spawn();
    let admin = app.seed_user(Role::Admin).await;

    let (status, _) = app
        .request(
            "GET",
            &format!("/api/users/{}", uuid::Uuid::new_v4()),
            Some(&app.token_for(&admin)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
