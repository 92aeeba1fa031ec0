//! PostgreSQL implementation of the portal store.

use async_trait::async_trait;
use portal_core::error::AppError;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::models::{Club, ClubMember, Event, EventMember, EventStatus, Notification, Post, User};
use crate::services::PortalStore;

/// PostgreSQL store wrapper.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store from a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map an insert error, surfacing uniqueness violations as Conflict.
fn map_insert_err(e: sqlx::Error, what: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(anyhow::anyhow!("{} already exists", what))
        }
        _ => AppError::DatabaseError(anyhow::anyhow!(e)),
    }
}

fn map_db_err(e: sqlx::Error) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(e))
}

#[async_trait]
impl PortalStore for PgStore {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Database health check failed: {}", e))
            })?;
        Ok(())
    }

    // ==================== Users ====================

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn provision_user(&self, user: &User) -> Result<User, AppError> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, email, display_name, avatar_url, role_code, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user.user_id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(&user.role_code)
        .bind(user.created_utc)
        .bind(user.updated_utc)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "A user with this email"))?;

        if let Some(created) = inserted {
            return Ok(created);
        }

        // The id conflicted: an earlier request already provisioned it.
        self.find_user(user.user_id).await?.ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!("provisioned user record vanished"))
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_utc DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2, display_name = $3, avatar_url = $4, role_code = $5, updated_utc = $6
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id)
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(&user.role_code)
        .bind(user.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn recent_users(&self, limit: i64) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_utc DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    // ==================== Events ====================

    async fn insert_event(&self, event: &Event) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO events (event_id, title, description, location, starts_utc, ends_utc,
                                capacity, status_code, created_by, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(event.event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_utc)
        .bind(event.ends_utc)
        .bind(event.capacity)
        .bind(&event.status_code)
        .bind(event.created_by)
        .bind(event.created_utc)
        .bind(event.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Event"))?;
        Ok(())
    }

    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE event_id = $1")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn list_events(&self, status: Option<EventStatus>) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT * FROM events
            WHERE ($1::TEXT IS NULL OR status_code = $1)
            ORDER BY starts_utc ASC
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)
    }

    async fn update_event(&self, event: &Event) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE events
            SET title = $2, description = $3, location = $4, starts_utc = $5, ends_utc = $6,
                capacity = $7, updated_utc = $8
            WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.location)
        .bind(event.starts_utc)
        .bind(event.ends_utc)
        .bind(event.capacity)
        .bind(event.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn update_event_status(
        &self,
        event_id: Uuid,
        status: EventStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE events SET status_code = $2, updated_utc = $3 WHERE event_id = $1")
            .bind(event_id)
            .bind(status.as_str())
            .bind(chrono::Utc::now())
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn count_events(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn count_events_with_status(&self, status: EventStatus) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events WHERE status_code = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn recent_events(&self, limit: i64) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY created_utc DESC LIMIT $1")
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    // ==================== Event membership ====================

    async fn add_event_member(&self, member: &EventMember) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO event_members (event_id, user_id, registered_utc)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(member.event_id)
        .bind(member.user_id)
        .bind(member.registered_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Event registration"))?;
        Ok(())
    }

    async fn remove_event_member(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM event_members WHERE event_id = $1 AND user_id = $2")
                .bind(event_id)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(map_db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn is_event_member(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM event_members WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(count > 0)
    }

    // ==================== Clubs ====================

    async fn insert_club(&self, club: &Club) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO clubs (club_id, club_name, description, category, created_by,
                               created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(club.club_id)
        .bind(&club.club_name)
        .bind(&club.description)
        .bind(&club.category)
        .bind(club.created_by)
        .bind(club.created_utc)
        .bind(club.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "A club with this name"))?;
        Ok(())
    }

    async fn find_club(&self, club_id: Uuid) -> Result<Option<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs WHERE club_id = $1")
            .bind(club_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn list_clubs(&self) -> Result<Vec<Club>, AppError> {
        sqlx::query_as::<_, Club>("SELECT * FROM clubs ORDER BY club_name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn update_club(&self, club: &Club) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE clubs
            SET club_name = $2, description = $3, category = $4, updated_utc = $5
            WHERE club_id = $1
            "#,
        )
        .bind(club.club_id)
        .bind(&club.club_name)
        .bind(&club.description)
        .bind(&club.category)
        .bind(club.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "A club with this name"))?;
        Ok(())
    }

    async fn delete_club(&self, club_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(club_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn count_clubs(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clubs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)
    }

    // ==================== Club membership ====================

    async fn add_club_member(&self, member: &ClubMember) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO club_members (club_id, user_id, member_role, joined_utc)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(member.club_id)
        .bind(member.user_id)
        .bind(&member.member_role)
        .bind(member.joined_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Club membership"))?;
        Ok(())
    }

    async fn remove_club_member(&self, club_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM club_members WHERE club_id = $1 AND user_id = $2")
            .bind(club_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_club_members(&self, club_id: Uuid) -> Result<Vec<ClubMember>, AppError> {
        sqlx::query_as::<_, ClubMember>(
            "SELECT * FROM club_members WHERE club_id = $1 ORDER BY joined_utc ASC",
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)
    }

    // ==================== Posts ====================

    async fn insert_post(&self, post: &Post) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO posts (post_id, title, body, created_by, created_utc, updated_utc)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.post_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.created_by)
        .bind(post.created_utc)
        .bind(post.updated_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Post"))?;
        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE post_id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts ORDER BY created_utc DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    async fn update_post(&self, post: &Post) -> Result<(), AppError> {
        sqlx::query("UPDATE posts SET title = $2, body = $3, updated_utc = $4 WHERE post_id = $1")
            .bind(post.post_id)
            .bind(&post.title)
            .bind(&post.body)
            .bind(post.updated_utc)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn count_posts(&self) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)
    }

    // ==================== Notifications ====================

    async fn insert_notification(&self, notification: &Notification) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (notification_id, user_id, title, body, kind_code,
                                       read_flag, created_utc)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(notification.notification_id)
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(&notification.kind_code)
        .bind(notification.read_flag)
        .bind(notification.created_utc)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_err(e, "Notification"))?;
        Ok(())
    }

    async fn list_notifications_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_utc DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE notifications SET read_flag = TRUE WHERE notification_id = $1 AND user_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;
        Ok(result.rows_affected() > 0)
    }
}
