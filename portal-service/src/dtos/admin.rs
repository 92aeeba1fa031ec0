use serde::{Deserialize, Serialize};

use crate::models::{EventResponse, UserResponse};

/// Aggregate dashboard payload; cached read-through with a bounded TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_users: i64,
    pub total_events: i64,
    pub pending_events: i64,
    pub total_clubs: i64,
    pub total_posts: i64,
    pub recent_users: Vec<UserResponse>,
    pub recent_events: Vec<EventResponse>,
}
