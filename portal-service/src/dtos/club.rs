use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateClubRequest {
    #[validate(length(min = 3, max = 120, message = "Club name must be 3-120 characters"))]
    pub club_name: String,
    #[validate(length(max = 4000, message = "Description too long"))]
    pub description: String,
    #[validate(length(min = 1, max = 80, message = "Category must be 1-80 characters"))]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateClubRequest {
    #[validate(length(min = 3, max = 120, message = "Club name must be 3-120 characters"))]
    pub club_name: Option<String>,
    #[validate(length(max = 4000, message = "Description too long"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 80, message = "Category must be 1-80 characters"))]
    pub category: Option<String>,
}
