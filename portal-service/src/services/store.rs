//! Typed CRUD interface over the relational store.
//!
//! Handlers depend on this trait only; the Postgres implementation is
//! [`crate::services::PgStore`], and the test suites swap in the in-memory
//! [`crate::services::MemoryStore`].

use async_trait::async_trait;
use portal_core::error::AppError;
use uuid::Uuid;

use crate::models::{Club, ClubMember, Event, EventMember, EventStatus, Notification, Post, User};

#[async_trait]
pub trait PortalStore: Send + Sync {
    /// Ping the store.
    async fn health_check(&self) -> Result<(), AppError>;

    // ==================== Users ====================

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError>;

    /// Idempotent insert keyed on `user_id`. An existing record is returned
    /// untouched; a clash on the email uniqueness constraint is a Conflict.
    async fn provision_user(&self, user: &User) -> Result<User, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn update_user(&self, user: &User) -> Result<(), AppError>;
    async fn count_users(&self) -> Result<i64, AppError>;
    async fn recent_users(&self, limit: i64) -> Result<Vec<User>, AppError>;

    // ==================== Events ====================

    async fn insert_event(&self, event: &Event) -> Result<(), AppError>;
    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError>;
    async fn list_events(&self, status: Option<EventStatus>) -> Result<Vec<Event>, AppError>;
    async fn update_event(&self, event: &Event) -> Result<(), AppError>;
    async fn update_event_status(
        &self,
        event_id: Uuid,
        status: EventStatus,
    ) -> Result<(), AppError>;

    /// Delete an event; membership edges cascade.
    async fn delete_event(&self, event_id: Uuid) -> Result<(), AppError>;

    async fn count_events(&self) -> Result<i64, AppError>;
    async fn count_events_with_status(&self, status: EventStatus) -> Result<i64, AppError>;
    async fn recent_events(&self, limit: i64) -> Result<Vec<Event>, AppError>;

    // ==================== Event membership ====================

    /// Conflict when the (event, user) edge already exists.
    async fn add_event_member(&self, member: &EventMember) -> Result<(), AppError>;

    /// Returns whether an edge existed to remove.
    async fn remove_event_member(&self, event_id: Uuid, user_id: Uuid)
        -> Result<bool, AppError>;

    async fn is_event_member(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;

    // ==================== Clubs ====================

    /// Conflict when the club name is taken.
    async fn insert_club(&self, club: &Club) -> Result<(), AppError>;

    async fn find_club(&self, club_id: Uuid) -> Result<Option<Club>, AppError>;
    async fn list_clubs(&self) -> Result<Vec<Club>, AppError>;
    async fn update_club(&self, club: &Club) -> Result<(), AppError>;

    /// Delete a club; membership edges cascade.
    async fn delete_club(&self, club_id: Uuid) -> Result<(), AppError>;

    async fn count_clubs(&self) -> Result<i64, AppError>;

    // ==================== Club membership ====================

    /// Conflict when the (club, user) edge already exists.
    async fn add_club_member(&self, member: &ClubMember) -> Result<(), AppError>;

    /// Returns whether an edge existed to remove.
    async fn remove_club_member(&self, club_id: Uuid, user_id: Uuid) -> Result<bool, AppError>;

    async fn list_club_members(&self, club_id: Uuid) -> Result<Vec<ClubMember>, AppError>;

    // ==================== Posts ====================

    async fn insert_post(&self, post: &Post) -> Result<(), AppError>;
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>, AppError>;
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;
    async fn update_post(&self, post: &Post) -> Result<(), AppError>;
    async fn delete_post(&self, post_id: Uuid) -> Result<(), AppError>;
    async fn count_posts(&self) -> Result<i64, AppError>;

    // ==================== Notifications ====================

    async fn insert_notification(&self, notification: &Notification) -> Result<(), AppError>;
    async fn list_notifications_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, AppError>;

    /// Marks a notification read if it exists and belongs to `user_id`;
    /// returns whether a row was updated.
    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError>;
}
