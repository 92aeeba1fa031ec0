//! Admin dashboard aggregates.

use axum::{extract::State, response::IntoResponse, Json};
use portal_core::error::AppError;

use crate::{
    dtos::admin::DashboardResponse,
    models::{EventResponse, EventStatus, UserResponse},
    AppState,
};

const RECENT_LIMIT: i64 = 5;

/// Aggregate counts plus the most recent users and events. Served through
/// the single-entry TTL cache; a stale read inside the TTL is acceptable.
pub async fn dashboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    if let Some(cached) = state.dashboard_cache.get().await {
        return Ok(Json(cached));
    }

    let stats = DashboardResponse {
        total_users: state.store.count_users().await?,
        total_events: state.store.count_events().await?,
        pending_events: state
            .store
            .count_events_with_status(EventStatus::Pending)
            .await?,
        total_clubs: state.store.count_clubs().await?,
        total_posts: state.store.count_posts().await?,
        recent_users: state
            .store
            .recent_users(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect(),
        recent_events: state
            .store
            .recent_events(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(EventResponse::from)
            .collect(),
    };

    state.dashboard_cache.put(stats.clone()).await;
    Ok(Json(stats))
}
