//! Test helper module for portal-service integration tests.
//!
//! Wires the router to the in-memory store and a throwaway session secret,
//! and provides request/response helpers for the oneshot-style tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use portal_core::config as core_config;
use portal_service::{
    build_router,
    config::{
        DashboardConfig, DatabaseConfig, Environment, IdentityConfig, PortalConfig, SecurityConfig,
    },
    models::{Role, User},
    services::{DashboardCache, IdentityVerifier, MemoryStore, PortalStore, SessionClaims},
    AppState,
};
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test application backed by the in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::spawn_with_cache_ttl(30)
    }

    pub fn spawn_with_cache_ttl(cache_ttl_seconds: i64) -> Self {
        let config = test_config(cache_ttl_seconds);
        let store = Arc::new(MemoryStore::new());
        let identity = IdentityVerifier::new(&config.identity);
        let dashboard_cache = DashboardCache::new(config.dashboard.cache_ttl_seconds);

        let state = AppState {
            config,
            store: store.clone(),
            identity,
            dashboard_cache,
        };

        let router = build_router(state.clone());

        Self {
            router,
            store,
            state,
        }
    }

    /// Insert a directory record with the given role and return it.
    pub async fn seed_user(&self, role: Role) -> User {
        let email = format!("{}@campus.test", Uuid::new_v4().simple());
        let mut user = User::provisioned(Uuid::new_v4(), email);
        user.role_code = role.as_str().to_string();
        self.store
            .provision_user(&user)
            .await
            .expect("Failed to seed user");
        user
    }

    /// A valid provider session token for the given record.
    pub fn token_for(&self, user: &User) -> String {
        mint_token(user.user_id, &user.email)
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, json)
    }
}

/// Mint a provider session token signed with the test secret.
pub fn mint_token(sub: Uuid, email: &str) -> String {
    mint_token_with_expiry(sub, email, 3600)
}

/// Mint a token with an arbitrary expiry offset (negative = already expired).
pub fn mint_token_with_expiry(sub: Uuid, email: &str, expires_in_seconds: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub,
        email: email.to_string(),
        email_verified: true,
        exp: now + expires_in_seconds,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}

fn test_config(cache_ttl_seconds: i64) -> PortalConfig {
    PortalConfig {
        common: core_config::Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
        },
        environment: Environment::Dev,
        service_name: "portal-service".to_string(),
        service_version: "0.1.0".to_string(),
        log_level: "error".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            url: "postgres://localhost/portal_test".to_string(),
            max_connections: 5,
            min_connections: 1,
        },
        identity: IdentityConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        dashboard: DashboardConfig { cache_ttl_seconds },
    }
}

/// Create an APPROVED event owned by `owner` without going through the API.
pub async fn seed_approved_event(app: &TestApp, owner: &User) -> portal_service::models::Event {
    use portal_service::models::{Event, EventStatus};

    let event = Event::new(
        "Seeded event".to_string(),
        "Seeded for tests".to_string(),
        "Main hall".to_string(),
        Utc::now() + chrono::Duration::days(1),
        Utc::now() + chrono::Duration::days(1) + chrono::Duration::hours(2),
        Some(100),
        owner.user_id,
    );
    app.store
        .insert_event(&event)
        .await
        .expect("Failed to seed event");
    app.store
        .update_event_status(event.event_id, EventStatus::Approved)
        .await
        .expect("Failed to approve seeded event");
    app.store.find_event(event.event_id).await.unwrap().unwrap()
}

pub fn event_body(title: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": "An event for the test suite",
        "location": "Main hall",
        "starts_utc": "2026-10-01T18:00:00Z",
        "ends_utc": "2026-10-01T20:00:00Z",
        "capacity": 50
    })
}
