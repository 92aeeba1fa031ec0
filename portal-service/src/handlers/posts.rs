//! Community post CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::post::{CreatePostRequest, UpdatePostRequest},
    middleware::AuthUser,
    models::{Post, PostResponse},
    AppState,
};

pub async fn list_posts(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.store.list_posts().await?;
    Ok(Json(
        posts.into_iter().map(PostResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn get_post(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let post = fetch_post(&state, post_id).await?;
    Ok(Json(PostResponse::from(post)))
}

pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let post = Post::new(req.title, req.body, user.0.user_id);
    state.store.insert_post(&post).await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    user: AuthUser,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut post = fetch_post(&state, post_id).await?;
    user.0.ensure_owner_or_admin(post.created_by)?;

    if let Some(title) = req.title {
        post.title = title;
    }
    if let Some(body) = req.body {
        post.body = body;
    }

    post.updated_utc = chrono::Utc::now();
    state.store.update_post(&post).await?;

    Ok(Json(PostResponse::from(post)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let post = fetch_post(&state, post_id).await?;
    user.0.ensure_owner_or_admin(post.created_by)?;

    state.store.delete_post(post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_post(state: &AppState, post_id: Uuid) -> Result<Post, AppError> {
    state
        .store
        .find_post(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Post not found")))
}
