//! Notification endpoints; users only ever see their own rows.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use uuid::Uuid;

use crate::{middleware::AuthUser, models::NotificationResponse, AppState};

pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let notifications = state
        .store
        .list_notifications_for_user(user.0.user_id)
        .await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .store
        .mark_notification_read(notification_id, user.0.user_id)
        .await?;

    // Rows addressed to other users are indistinguishable from absent ones.
    if !updated {
        return Err(AppError::NotFound(anyhow::anyhow!("Notification not found")));
    }

    Ok(Json(serde_json::json!({ "message": "Notification marked as read" })))
}
