use serde::Deserialize;
use validator::Validate;

use crate::models::Role;

/// Profile update. The `role` field is only honored for ADMIN callers.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 120, message = "Display name must be 1-120 characters"))]
    pub display_name: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Avatar URL must be 1-500 characters"))]
    pub avatar_url: Option<String>,
    pub role: Option<Role>,
}
