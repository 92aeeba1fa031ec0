//! User directory model - one record per identity-provider subject.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Privilege level, ordered least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "MODERATOR" => Ok(Role::Moderator),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Directory record, keyed by the identity provider's subject id.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role_code: String,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl User {
    /// Build the record lazily provisioned on first authenticated request.
    /// Display name defaults to the email local-part; role is always USER.
    pub fn provisioned(user_id: Uuid, email: String) -> Self {
        let local_part = email.split('@').next().unwrap_or_default();
        let display_name = if local_part.is_empty() {
            email.clone()
        } else {
            local_part.to_string()
        };
        let now = Utc::now();
        Self {
            user_id,
            email,
            display_name,
            avatar_url: None,
            role_code: Role::User.as_str().to_string(),
            created_utc: now,
            updated_utc: now,
        }
    }

    /// The record's role; unknown codes degrade to USER.
    pub fn role(&self) -> Role {
        self.role_code.parse().unwrap_or(Role::User)
    }

    /// Convert to sanitized response (no internal fields).
    pub fn sanitized(&self) -> UserResponse {
        UserResponse::from(self.clone())
    }
}

/// User response for API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role_code: String,
    pub created_utc: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            user_id: u.user_id,
            email: u.email,
            display_name: u.display_name,
            avatar_url: u.avatar_url,
            role_code: u.role_code,
            created_utc: u.created_utc,
        }
    }
}
