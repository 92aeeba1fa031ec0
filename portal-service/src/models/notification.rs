//! In-app notifications addressed to a directory user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub notification_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub kind_code: String,
    pub read_flag: bool,
    pub created_utc: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, kind: NotificationKind, title: String, body: String) -> Self {
        Self {
            notification_id: Uuid::new_v4(),
            user_id,
            title,
            body,
            kind_code: kind.as_str().to_string(),
            read_flag: false,
            created_utc: Utc::now(),
        }
    }

    /// Notification sent to an event creator on approval.
    pub fn event_approved(user_id: Uuid, event_title: &str) -> Self {
        Self::new(
            user_id,
            NotificationKind::Success,
            "Event approved".to_string(),
            format!("Your event \"{}\" has been approved.", event_title),
        )
    }

    /// Notification sent to an event creator on rejection.
    pub fn event_rejected(user_id: Uuid, event_title: &str) -> Self {
        Self::new(
            user_id,
            NotificationKind::Error,
            "Event rejected".to_string(),
            format!("Your event \"{}\" has been rejected.", event_title),
        )
    }
}

/// Notification response for API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notification_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub kind_code: String,
    pub read_flag: bool,
    pub created_utc: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            notification_id: n.notification_id,
            user_id: n.user_id,
            title: n.title,
            body: n.body,
            kind_code: n.kind_code,
            read_flag: n.read_flag,
            created_utc: n.created_utc,
        }
    }
}
