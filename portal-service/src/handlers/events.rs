//! Event CRUD, the approval state machine, and registration edges.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use portal_core::error::AppError;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::event::{CreateEventRequest, EventListQuery, UpdateEventRequest},
    middleware::AuthUser,
    models::{Event, EventMember, EventResponse, EventStatus, Notification},
    AppState,
};

pub async fn list_events(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<EventListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(raw.parse::<EventStatus>().map_err(|_| {
            AppError::BadRequest(anyhow::anyhow!("Unknown event status '{}'", raw))
        })?),
        None => None,
    };

    let events = state.store.list_events(status).await?;
    Ok(Json(
        events.into_iter().map(EventResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn get_event(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let event = fetch_event(&state, event_id).await?;
    Ok(Json(EventResponse::from(event)))
}

pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    if req.ends_utc <= req.starts_utc {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Event must end after it starts"
        )));
    }

    let event = Event::new(
        req.title,
        req.description,
        req.location,
        req.starts_utc,
        req.ends_utc,
        req.capacity,
        user.0.user_id,
    );
    state.store.insert_event(&event).await?;

    tracing::info!(event_id = %event.event_id, creator = %user.0.user_id, "Event submitted");
    Ok((StatusCode::CREATED, Json(EventResponse::from(event))))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
    Json(req): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let mut event = fetch_event(&state, event_id).await?;
    user.0.ensure_owner_or_admin(event.created_by)?;

    if let Some(title) = req.title {
        event.title = title;
    }
    if let Some(description) = req.description {
        event.description = description;
    }
    if let Some(location) = req.location {
        event.location = location;
    }
    if let Some(starts_utc) = req.starts_utc {
        event.starts_utc = starts_utc;
    }
    if let Some(ends_utc) = req.ends_utc {
        event.ends_utc = ends_utc;
    }
    if let Some(capacity) = req.capacity {
        event.capacity = Some(capacity);
    }

    if event.ends_utc <= event.starts_utc {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Event must end after it starts"
        )));
    }

    event.updated_utc = chrono::Utc::now();
    state.store.update_event(&event).await?;

    Ok(Json(EventResponse::from(event)))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let event = fetch_event(&state, event_id).await?;
    user.0.ensure_owner_or_admin(event.created_by)?;

    state.store.delete_event(event_id).await?;
    tracing::info!(event_id = %event_id, by = %user.0.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    transition_event(state, event_id, user, EventStatus::Approved).await
}

pub async fn reject_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    transition_event(state, event_id, user, EventStatus::Rejected).await
}

pub async fn cancel_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    transition_event(state, event_id, user, EventStatus::Cancelled).await
}

/// Apply a state-machine transition, enforcing the authorization path and
/// emitting the creator notification on approve/reject.
async fn transition_event(
    state: AppState,
    event_id: Uuid,
    user: AuthUser,
    next: EventStatus,
) -> Result<impl IntoResponse, AppError> {
    let mut event = fetch_event(&state, event_id).await?;

    match next {
        EventStatus::Approved | EventStatus::Rejected => user.0.require_admin()?,
        EventStatus::Cancelled => user.0.ensure_owner_or_admin(event.created_by)?,
        EventStatus::Pending => {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Events cannot be moved back to PENDING"
            )));
        }
    }

    let current = event.status();
    if !current.can_transition_to(next) {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Cannot move event from {} to {}",
            current.as_str(),
            next.as_str()
        )));
    }

    state.store.update_event_status(event_id, next).await?;

    let notification = match next {
        EventStatus::Approved => Some(Notification::event_approved(event.created_by, &event.title)),
        EventStatus::Rejected => Some(Notification::event_rejected(event.created_by, &event.title)),
        _ => None,
    };
    if let Some(notification) = notification {
        state.store.insert_notification(&notification).await?;
    }

    tracing::info!(
        event_id = %event_id,
        from = current.as_str(),
        to = next.as_str(),
        by = %user.0.user_id,
        "Event status changed"
    );

    event.status_code = next.as_str().to_string();
    event.updated_utc = chrono::Utc::now();
    Ok(Json(EventResponse::from(event)))
}

pub async fn join_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let event = fetch_event(&state, event_id).await?;

    if event.status() != EventStatus::Approved {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Event is not open for registration"
        )));
    }

    let member = EventMember::new(event_id, user.0.user_id);
    state.store.add_event_member(&member).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Registered for event" })),
    ))
}

pub async fn leave_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    // 404 for an unknown event and for a registration that was never made.
    fetch_event(&state, event_id).await?;

    let removed = state
        .store
        .remove_event_member(event_id, user.0.user_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound(anyhow::anyhow!(
            "Not registered for this event"
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Registration cancelled" })))
}

async fn fetch_event(state: &AppState, event_id: Uuid) -> Result<Event, AppError> {
    state
        .store
        .find_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Event not found")))
}
