//! Club CRUD and club membership edges.

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
    dtos::club::{CreateClubRequest, UpdateClubRequest},
    middleware::AuthUser,
    models::{Club, ClubMember, ClubMemberResponse, ClubMemberRole, ClubResponse},
    AppState,
};

pub async fn list_clubs(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let clubs = state.store.list_clubs().await?;
    Ok(Json(
        clubs.into_iter().map(ClubResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn get_club(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(club_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let club = fetch_club(&state, club_id).await?;
    Ok(Json(ClubResponse::from(club)))
}

pub async fn list_members(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(club_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    fetch_club(&state, club_id).await?;
    let members = state.store.list_club_members(club_id).await?;
    Ok(Json(
        members
            .into_iter()
            .map(ClubMemberResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn create_club(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateClubRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let club = Club::new(req.club_name, req.description, req.category, user.0.user_id);
    state.store.insert_club(&club).await?;

    // The founder runs the club from the start.
    let founder = ClubMember::new(club.club_id, user.0.user_id, ClubMemberRole::Admin);
    state.store.add_club_member(&founder).await?;

    tracing::info!(club_id = %club.club_id, creator = %user.0.user_id, "Club created");
    Ok((StatusCode::CREATED, Json(ClubResponse::from(club))))
}

pub async fn update_club(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
    user: AuthUser,
    Json(req): Json<UpdateClubRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut club = fetch_club(&state, club_id).await?;
    user.0.ensure_owner_or_admin(club.created_by)?;

    if let Some(club_name) = req.club_name {
        club.club_name = club_name;
    }
    if let Some(description) = req.description {
        club.description = description;
    }
    if let Some(category) = req.category {
        club.category = Some(category);
    }

    club.updated_utc = chrono::Utc::now();
    state.store.update_club(&club).await?;

    Ok(Json(ClubResponse::from(club)))
}

pub async fn delete_club(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let club = fetch_club(&state, club_id).await?;
    user.0.ensure_owner_or_admin(club.created_by)?;

    state.store.delete_club(club_id).await?;
    tracing::info!(club_id = %club_id, by = %user.0.user_id, "Club deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn join_club(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    fetch_club(&state, club_id).await?;

    let member = ClubMember::new(club_id, user.0.user_id, ClubMemberRole::Member);
    state.store.add_club_member(&member).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Joined club" })),
    ))
}

pub async fn leave_club(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    fetch_club(&state, club_id).await?;

    let removed = state
        .store
        .remove_club_member(club_id, user.0.user_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Not a member of this club"
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Left club" })))
}

async fn fetch_club(state: &AppState, club_id: Uuid) -> Result<Club, AppError> {
    state
        .store
        .find_club(club_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Club not found")))
}
