pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Json, Router,
};
use portal_core::error::AppError;
use portal_core::middleware::{
    request_id::request_id_middleware, security_headers::security_headers_middleware,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::PortalConfig;
use crate::services::{DashboardCache, IdentityVerifier, PortalStore};

#[derive(Clone)]
pub struct AppState {
    pub config: PortalConfig,
    pub store: Arc<dyn PortalStore>,
    pub identity: IdentityVerifier,
    pub dashboard_cache: DashboardCache,
}

pub fn build_router(state: AppState) -> Router {
    // Every /api route requires a provider session; the portal's browse
    // surface sits behind the campus login like everything else.
    let api_routes = Router::new()
        .route(
            "/api/events",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/api/events/:id",
            get(handlers::events::get_event)
                .put(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route("/api/events/:id/approve", post(handlers::events::approve_event))
        .route("/api/events/:id/reject", post(handlers::events::reject_event))
        .route("/api/events/:id/cancel", post(handlers::events::cancel_event))
        .route(
            "/api/events/:id/join",
            post(handlers::events::join_event).delete(handlers::events::leave_event),
        )
        .route(
            "/api/clubs",
            get(handlers::clubs::list_clubs).post(handlers::clubs::create_club),
        )
        .route(
            "/api/clubs/:id",
            get(handlers::clubs::get_club)
                .put(handlers::clubs::update_club)
                .delete(handlers::clubs::delete_club),
        )
        .route("/api/clubs/:id/members", get(handlers::clubs::list_members))
        .route(
            "/api/clubs/:id/join",
            post(handlers::clubs::join_club).delete(handlers::clubs::leave_club),
        )
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/api/posts/:id",
            get(handlers::posts::get_post)
                .put(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route("/api/users", get(handlers::users::list_users))
        .route(
            "/api/users/:id",
            get(handlers::users::get_user).put(handlers::users::update_user),
        )
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/api/notifications/:id/read",
            post(handlers::notifications::mark_read),
        )
        .layer(from_fn_with_state(state.clone(), middleware::auth_middleware));

    let admin_routes = Router::new()
        .route("/api/admin/dashboard", get(handlers::admin::dashboard))
        .layer(from_fn(middleware::require_admin_middleware))
        .layer(from_fn_with_state(state.clone(), middleware::auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .merge(admin_routes)
        .with_state(state.clone())
        // Tracing span per request, keyed on the propagated request id
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&state.config))
}

fn cors_layer(config: &PortalConfig) -> CorsLayer {
    let origins = config
        .security
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::error!(%origin, %error, "Skipping invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Service health check.
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Store health check failed");
        e
    })?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "database": "up"
        }
    })))
}
