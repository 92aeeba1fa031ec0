//! Services layer for the portal.
//!
//! The store trait and its implementations, identity-provider session
//! verification, role resolution, and the dashboard cache.

mod dashboard;
mod identity;
mod memory;
mod pg;
mod roles;
mod store;

pub use dashboard::DashboardCache;
pub use identity::{IdentityVerifier, SessionClaims};
pub use memory::MemoryStore;
pub use pg::PgStore;
pub use roles::{resolve_role, RoleResolution};
pub use store::PortalStore;
