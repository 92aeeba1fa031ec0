//! Event model and its approval state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "PENDING",
            EventStatus::Approved => "APPROVED",
            EventStatus::Rejected => "REJECTED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }

    /// Permitted transitions: PENDING -> APPROVED | REJECTED, and any
    /// non-terminal state -> CANCELLED. CANCELLED is terminal.
    pub fn can_transition_to(self, next: EventStatus) -> bool {
        matches!(
            (self, next),
            (EventStatus::Pending, EventStatus::Approved)
                | (EventStatus::Pending, EventStatus::Rejected)
                | (EventStatus::Pending, EventStatus::Cancelled)
                | (EventStatus::Approved, EventStatus::Cancelled)
                | (EventStatus::Rejected, EventStatus::Cancelled)
        )
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EventStatus::Pending),
            "APPROVED" => Ok(EventStatus::Approved),
            "REJECTED" => Ok(EventStatus::Rejected),
            "CANCELLED" => Ok(EventStatus::Cancelled),
            _ => Err(format!("Invalid event status: {}", s)),
        }
    }
}

/// Event entity, owned by its creator.
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_utc: DateTime<Utc>,
    pub ends_utc: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub status_code: String,
    pub created_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Event {
    /// Create a new event awaiting approval.
    pub fn new(
        title: String,
        description: String,
        location: String,
        starts_utc: DateTime<Utc>,
        ends_utc: DateTime<Utc>,
        capacity: Option<i32>,
        created_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            event_id: Uuid::new_v4(),
            title,
            description,
            location,
            starts_utc,
            ends_utc,
            capacity,
            status_code: EventStatus::Pending.as_str().to_string(),
            created_by,
            created_utc: now,
            updated_utc: now,
        }
    }

    /// The event's status; unknown codes degrade to PENDING.
    pub fn status(&self) -> EventStatus {
        self.status_code.parse().unwrap_or(EventStatus::Pending)
    }
}

/// Registration edge linking a user to an event.
#[derive(Debug, Clone, FromRow)]
pub struct EventMember {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub registered_utc: DateTime<Utc>,
}

impl EventMember {
    pub fn new(event_id: Uuid, user_id: Uuid) -> Self {
        Self {
            event_id,
            user_id,
            registered_utc: Utc::now(),
        }
    }
}

/// Event response for API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_utc: DateTime<Utc>,
    pub ends_utc: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub status_code: String,
    pub created_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            event_id: e.event_id,
            title: e.title,
            description: e.description,
            location: e.location,
            starts_utc: e.starts_utc,
            ends_utc: e.ends_utc,
            capacity: e.capacity,
            status_code: e.status_code,
            created_by: e.created_by,
            created_utc: e.created_utc,
            updated_utc: e.updated_utc,
        }
    }
}
