//! In-memory implementation of the portal store, used by the test suites.
//!
//! Mirrors the relational constraints the Postgres schema enforces:
//! primary-key upserts, email/club-name uniqueness, and cascade deletion of
//! membership edges.

use async_trait::async_trait;
use portal_core::error::AppError;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{Club, ClubMember, Event, EventMember, EventStatus, Notification, Post, User};
use crate::services::PortalStore;

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    events: HashMap<Uuid, Event>,
    event_members: HashMap<(Uuid, Uuid), EventMember>,
    clubs: HashMap<Uuid, Club>,
    club_members: HashMap<(Uuid, Uuid), ClubMember>,
    posts: HashMap<Uuid, Post>,
    notifications: HashMap<Uuid, Notification>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflict(what: &str) -> AppError {
    AppError::Conflict(anyhow::anyhow!("{} already exists", what))
}

#[async_trait]
impl PortalStore for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    // ==================== Users ====================

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.get(&user_id).cloned())
    }

    async fn provision_user(&self, user: &User) -> Result<User, AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.users.get(&user.user_id) {
            return Ok(existing.clone());
        }
        if state
            .users
            .values()
            .any(|u| u.email == user.email && u.user_id != user.user_id)
        {
            return Err(conflict("A user with this email"));
        }
        state.users.insert(user.user_id, user.clone());
        Ok(user.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        Ok(users)
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state
            .users
            .values()
            .any(|u| u.email == user.email && u.user_id != user.user_id)
        {
            return Err(conflict("A user with this email"));
        }
        state.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.len() as i64)
    }

    async fn recent_users(&self, limit: i64) -> Result<Vec<User>, AppError> {
        let mut users = self.list_users().await?;
        users.truncate(limit as usize);
        Ok(users)
    }

    // ==================== Events ====================

    async fn insert_event(&self, event: &Event) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.events.contains_key(&event.event_id) {
            return Err(conflict("Event"));
        }
        state.events.insert(event.event_id, event.clone());
        Ok(())
    }

    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.events.get(&event_id).cloned())
    }

    async fn list_events(&self, status: Option<EventStatus>) -> Result<Vec<Event>, AppError> {
        let state = self.state.lock().unwrap();
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| status.map_or(true, |s| e.status() == s))
            .cloned()
            .collect();
        events.sort_by(|a, b| a.starts_utc.cmp(&b.starts_utc));
        Ok(events)
    }

    async fn update_event(&self, event: &Event) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.events.insert(event.event_id, event.clone());
        Ok(())
    }

    async fn update_event_status(
        &self,
        event_id: Uuid,
        status: EventStatus,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if let Some(event) = state.events.get_mut(&event_id) {
            event.status_code = status.as_str().to_string();
            event.updated_utc = chrono::Utc::now();
        }
        Ok(())
    }

    async fn delete_event(&self, event_id: Uuid) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.events.remove(&event_id);
        state.event_members.retain(|(eid, _), _| *eid != event_id);
        Ok(())
    }

    async fn count_events(&self) -> Result<i64, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.events.len() as i64)
    }

    async fn count_events_with_status(&self, status: EventStatus) -> Result<i64, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .events
            .values()
            .filter(|e| e.status() == status)
            .count() as i64)
    }

    async fn recent_events(&self, limit: i64) -> Result<Vec<Event>, AppError> {
        let state = self.state.lock().unwrap();
        let mut events: Vec<Event> = state.events.values().cloned().collect();
        events.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        events.truncate(limit as usize);
        Ok(events)
    }

    // ==================== Event membership ====================

    async fn add_event_member(&self, member: &EventMember) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let key = (member.event_id, member.user_id);
        if state.event_members.contains_key(&key) {
            return Err(conflict("Event registration"));
        }
        state.event_members.insert(key, member.clone());
        Ok(())
    }

    async fn remove_event_member(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.event_members.remove(&(event_id, user_id)).is_some())
    }

    async fn is_event_member(&self, event_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.event_members.contains_key(&(event_id, user_id)))
    }

    // ==================== Clubs ====================

    async fn insert_club(&self, club: &Club) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state
            .clubs
            .values()
            .any(|c| c.club_name == club.club_name && c.club_id != club.club_id)
        {
            return Err(conflict("A club with this name"));
        }
        state.clubs.insert(club.club_id, club.clone());
        Ok(())
    }

    async fn find_club(&self, club_id: Uuid) -> Result<Option<Club>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.clubs.get(&club_id).cloned())
    }

    async fn list_clubs(&self) -> Result<Vec<Club>, AppError> {
        let state = self.state.lock().unwrap();
        let mut clubs: Vec<Club> = state.clubs.values().cloned().collect();
        clubs.sort_by(|a, b| a.club_name.cmp(&b.club_name));
        Ok(clubs)
    }

    async fn update_club(&self, club: &Club) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state
            .clubs
            .values()
            .any(|c| c.club_name == club.club_name && c.club_id != club.club_id)
        {
            return Err(conflict("A club with this name"));
        }
        state.clubs.insert(club.club_id, club.clone());
        Ok(())
    }

    async fn delete_club(&self, club_id: Uuid) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.clubs.remove(&club_id);
        state.club_members.retain(|(cid, _), _| *cid != club_id);
        Ok(())
    }

    async fn count_clubs(&self) -> Result<i64, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.clubs.len() as i64)
    }

    // ==================== Club membership ====================

    async fn add_club_member(&self, member: &ClubMember) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        let key = (member.club_id, member.user_id);
        if state.club_members.contains_key(&key) {
            return Err(conflict("Club membership"));
        }
        state.club_members.insert(key, member.clone());
        Ok(())
    }

    async fn remove_club_member(&self, club_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.club_members.remove(&(club_id, user_id)).is_some())
    }

    async fn list_club_members(&self, club_id: Uuid) -> Result<Vec<ClubMember>, AppError> {
        let state = self.state.lock().unwrap();
        let mut members: Vec<ClubMember> = state
            .club_members
            .values()
            .filter(|m| m.club_id == club_id)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.joined_utc.cmp(&b.joined_utc));
        Ok(members)
    }

    // ==================== Posts ====================

    async fn insert_post(&self, post: &Post) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.posts.contains_key(&post.post_id) {
            return Err(conflict("Post"));
        }
        state.posts.insert(post.post_id, post.clone());
        Ok(())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.get(&post_id).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let state = self.state.lock().unwrap();
        let mut posts: Vec<Post> = state.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        Ok(posts)
    }

    async fn update_post(&self, post: &Post) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.posts.insert(post.post_id, post.clone());
        Ok(())
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.posts.remove(&post_id);
        Ok(())
    }

    async fn count_posts(&self) -> Result<i64, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.len() as i64)
    }

    // ==================== Notifications ====================

    async fn insert_notification(&self, notification: &Notification) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state
            .notifications
            .insert(notification.notification_id, notification.clone());
        Ok(())
    }

    async fn list_notifications_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, AppError> {
        let state = self.state.lock().unwrap();
        let mut notifications: Vec<Notification> = state
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_utc.cmp(&a.created_utc));
        Ok(notifications)
    }

    async fn mark_notification_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut state = self.state.lock().unwrap();
        match state.notifications.get_mut(&notification_id) {
            Some(n) if n.user_id == user_id => {
                n.read_flag = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
