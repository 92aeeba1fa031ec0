//! Club CRUD, founder auto-membership, and club membership edges.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use portal_service::models::Role;

fn club_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "club_name": name,
        "description": "A club for the test suite",
        "category": "Hobby"
    })
}

#[tokio::test]
async fn creating_a_club_makes_the_founder_its_admin_member() {
    let app = TestApp::spawn();
    let founder = app.seed_user(Role::User).await;
    let token = app.token_for(&founder);

    let (status, club) = app
        .request("POST", "/api/clubs", Some(&token), Some(club_body("Chess Society")))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let club_id = club["club_id"].as_str().unwrap();

    let (status, members) = app
        .request(
            "GET",
            &format!("/api/clubs/{}/members", club_id),
            Some(&token),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["user_id"], founder.user_id.to_string());
    assert_eq!(members[0]["member_role"], "ADMIN");
}

#[tokio::test]
async fn duplicate_club_names_conflict() {
    let app = TestApp::spawn();
    let founder = app.seed_user(Role::User).await;
    let rival = app.seed_user(Role::User).await;

    let (first, _) = app
        .request(
            "POST",
            "/api/clubs",
            Some(&app.token_for(&founder)),
            Some(club_body("Debate Club")),
        )
        .await;
    let (second, _) = app
        .request(
            "POST",
            "/api/clubs",
            Some(&app.token_for(&rival)),
            Some(club_body("Debate Club")),
        )
        .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn members_can_join_once() {
    let app = TestApp::spawn();
    let founder = app.seed_user(Role::User).await;
    let member = app.seed_user(Role::User).await;

    let (_, club) = app
        .request(
            "POST",
            "/api/clubs",
            Some(&app.token_for(&founder)),
            Some(club_body("Film Club")),
        )
        .await;
    let path = format!("/api/clubs/{}/join", club["club_id"].as_str().unwrap());
    let token = app.token_for(&member);

    let (first, _) = app.request("POST", &path, Some(&token), None).await;
    let (second, _) = app.request("POST", &path, Some(&token), None).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn leaving_without_membership_is_not_found() {
    let app = TestApp::spawn();
    let founder = app.seed_user(Role::User).await;
    let outsider = app.seed_user(Role::User).await;

    let (_, club) = app
        .request(
            "POST",
            "/api/clubs",
            Some(&app.token_for(&founder)),
            Some(club_body("Archery Club")),
        )
        .await;

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/clubs/{}/join", club["club_id"].as_str().unwrap()),
            Some(&app.token_for(&outsider)),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_the_owner_or_an_admin_can_update_a_club() {
    let app = TestApp::spawn();
    let founder = app.seed_user(Role::User).await;
    let bystander = app.seed_user(Role::User).await;
    let admin = app.seed_user(Role::Admin).await;

    let (_, club) = app
        .request(
            "POST",
            "/api/clubs",
            Some(&app.token_for(&founder)),
            Some(club_body("Astronomy Club")),
        )
        .await;
    let path = format!("/api/clubs/{}", club["club_id"].as_str().unwrap());
    let update = serde_json::json!({ "description": "Now with a telescope" });

    let (status, _) = app
        .request("PUT", &path, Some(&app.token_for(&bystander)), Some(update.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request("PUT", &path, Some(&app.token_for(&admin)), Some(update))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Now with a telescope");
}

#[tokio::test]
async fn deleting_a_club_cascades_membership() {
    let app = TestApp::spawn();
    let founder = app.seed_user(Role::User).await;
    let member = app.seed_user(Role::User).await;
    let founder_token = app.token_for(&founder);

    let (_, club) = app
        .request(
            "POST",
            "/api/clubs",
            Some(&founder_token),
            Some(club_body("Pottery Club")),
        )
        .await;
    let club_id = club["club_id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/clubs/{}/join", club_id),
        Some(&app.token_for(&member)),
        None,
    )
    .await;

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/clubs/{}", club_id),
            Some(&founder_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .request(
            "GET",
            &format!("/api/clubs/{}/members", club_id),
            Some(&founder_token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
