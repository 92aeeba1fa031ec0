pub mod admin;
pub mod club;
pub mod event;
pub mod post;
pub mod user;

use serde::{Deserialize, Serialize};

/// Shape of every error body returned by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
