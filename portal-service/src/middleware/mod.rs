mod admin;
mod auth;

pub use admin::require_admin_middleware;
pub use auth::{auth_middleware, AuthUser, CurrentUser};
