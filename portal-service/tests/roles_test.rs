//! Role resolution through the HTTP surface: lazy provisioning, idempotency,
//! and the fail-safe default of least privilege.

mod common;

use axum::http::StatusCode;
use common::{mint_token, mint_token_with_expiry, TestApp};
use portal_service::services::PortalStore;
use uuid::Uuid;

#[tokio::test]
async fn anonymous_request_is_unauthorized() {
    let app = TestApp::spawn();

    let (status, body) = app.request("GET", "/api/events", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = TestApp::spawn();

    let (status, _) = app
        .request("GET", "/api/events", Some("not-a-real-token"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let app = TestApp::spawn();
    let token = mint_token_with_expiry(Uuid::new_v4(), "late@campus.test", -3600);

    let (status, _) = app.request("GET", "/api/events", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn first_authenticated_request_provisions_a_user_record() {
    let app = TestApp::spawn();
    let subject = Uuid::new_v4();
    let token = mint_token(subject, "newcomer@campus.test");

    let (status, _) = app.request("GET", "/api/events", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let record = app.store.find_user(subject).await.unwrap().unwrap();
    assert_eq!(record.role_code, "USER");
    assert_eq!(record.display_name, "newcomer");
    assert_eq!(record.email, "newcomer@campus.test");
}

#[tokio::test]
async fn repeated_requests_do_not_duplicate_the_record() {
    let app = TestApp::spawn();
    let subject = Uuid::new_v4();
    let token = mint_token(subject, "regular@campus.test");

    for _ in 0..3 {
        let (status, _) = app.request("GET", "/api/events", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(app.store.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn provisioned_users_are_never_admins() {
    let app = TestApp::spawn();
    let token = mint_token(Uuid::new_v4(), "hopeful@campus.test");

    let (status, _) = app
        .request("GET", "/api/admin/dashboard", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
