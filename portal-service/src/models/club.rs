//! Club model and club membership edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role tag on a club membership edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClubMemberRole {
    Member,
    Admin,
}

impl ClubMemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClubMemberRole::Member => "MEMBER",
            ClubMemberRole::Admin => "ADMIN",
        }
    }
}

/// Club entity, owned by its creator.
#[derive(Debug, Clone, FromRow)]
pub struct Club {
    pub club_id: Uuid,
    pub club_name: String,
    pub description: String,
    pub category: Option<String>,
    pub created_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Club {
    pub fn new(
        club_name: String,
        description: String,
        category: Option<String>,
        created_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            club_id: Uuid::new_v4(),
            club_name,
            description,
            category,
            created_by,
            created_utc: now,
            updated_utc: now,
        }
    }
}

/// Membership edge linking a user to a club.
#[derive(Debug, Clone, FromRow)]
pub struct ClubMember {
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub member_role: String,
    pub joined_utc: DateTime<Utc>,
}

impl ClubMember {
    pub fn new(club_id: Uuid, user_id: Uuid, role: ClubMemberRole) -> Self {
        Self {
            club_id,
            user_id,
            member_role: role.as_str().to_string(),
            joined_utc: Utc::now(),
        }
    }
}

/// Club response for API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubResponse {
    pub club_id: Uuid,
    pub club_name: String,
    pub description: String,
    pub category: Option<String>,
    pub created_by: Uuid,
    pub created_utc: DateTime<Utc>,
}

impl From<Club> for ClubResponse {
    fn from(c: Club) -> Self {
        Self {
            club_id: c.club_id,
            club_name: c.club_name,
            description: c.description,
            category: c.category,
            created_by: c.created_by,
            created_utc: c.created_utc,
        }
    }
}

/// Club membership response for API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubMemberResponse {
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub member_role: String,
    pub joined_utc: DateTime<Utc>,
}

impl From<ClubMember> for ClubMemberResponse {
    fn from(m: ClubMember) -> Self {
        Self {
            club_id: m.club_id,
            user_id: m.user_id,
            member_role: m.member_role,
            joined_utc: m.joined_utc,
        }
    }
}
