//! User directory endpoints.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::{dtos::user::UpdateUserRequest, middleware::AuthUser, models::User, AppState};

/// Full directory listing; ADMIN only.
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    user.0.require_admin()?;

    let users = state.store.list_users().await?;
    Ok(Json(
        users.iter().map(User::sanitized).collect::<Vec<_>>(),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let record = fetch_user(&state, user_id).await?;
    Ok(Json(record.sanitized()))
}

/// Profile update: self or ADMIN. The `role` field is ADMIN-only; the
/// directory record is the single privilege source, so handing out roles is
/// itself a privileged operation.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    user: AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if req.role.is_some() {
        user.0.require_admin()?;
    }
    user.0.ensure_owner_or_admin(user_id)?;

    let mut record = fetch_user(&state, user_id).await?;

    if let Some(display_name) = req.display_name {
        record.display_name = display_name;
    }
    if let Some(avatar_url) = req.avatar_url {
        record.avatar_url = Some(avatar_url);
    }
    if let Some(role) = req.role {
        record.role_code = role.as_str().to_string();
        tracing::info!(subject = %user_id, role = role.as_str(), by = %user.0.user_id, "Role changed");
    }

    record.updated_utc = chrono::Utc::now();
    state.store.update_user(&record).await?;

    Ok(Json(record.sanitized()))
}

async fn fetch_user(state: &AppState, user_id: Uuid) -> Result<User, AppError> {
    state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))
}
