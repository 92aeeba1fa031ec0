pub mod admin;
pub mod clubs;
pub mod events;
pub mod notifications;
pub mod posts;
pub mod users;
