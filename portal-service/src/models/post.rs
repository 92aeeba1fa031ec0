use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Community post, owned by its author.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub post_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl Post {
    pub fn new(title: String, body: String, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            post_id: Uuid::new_v4(),
            title,
            body,
            created_by,
            created_utc: now,
            updated_utc: now,
        }
    }
}

/// Post response for API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub post_id: Uuid,
    pub title: String,
    pub body: String,
    pub created_by: Uuid,
    pub created_utc: DateTime<Utc>,
    pub updated_utc: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            post_id: p.post_id,
            title: p.title,
            body: p.body,
            created_by: p.created_by,
            created_utc: p.created_utc,
            updated_utc: p.updated_utc,
        }
    }
}
