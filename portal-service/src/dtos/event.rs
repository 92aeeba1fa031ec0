use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateEventRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,
    #[validate(length(max = 4000, message = "Description too long"))]
    pub description: String,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,
    pub starts_utc: DateTime<Utc>,
    pub ends_utc: DateTime<Utc>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 4000, message = "Description too long"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: Option<String>,
    pub starts_utc: Option<DateTime<Utc>>,
    pub ends_utc: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "Capacity must be positive"))]
    pub capacity: Option<i32>,
}

/// Query parameters for the event listing.
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub status: Option<String>,
}
