//! Read-through cache for the admin dashboard aggregates.
//!
//! One entry, bounded TTL, no invalidation on write: stale reads up to the
//! TTL are accepted. Owned by the app state, not a module singleton.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::dtos::admin::DashboardResponse;

struct CacheEntry {
    value: DashboardResponse,
    expires_utc: DateTime<Utc>,
}

#[derive(Clone)]
pub struct DashboardCache {
    ttl: Duration,
    slot: Arc<RwLock<Option<CacheEntry>>>,
}

impl DashboardCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_seconds),
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// The cached value, if present and not past its expiry.
    pub async fn get(&self) -> Option<DashboardResponse> {
        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(entry) if entry.expires_utc > Utc::now() => Some(entry.value.clone()),
            _ => None,
        }
    }

    pub async fn put(&self, value: DashboardResponse) {
        let entry = CacheEntry {
            value,
            expires_utc: Utc::now() + self.ttl,
        };
        *self.slot.write().await = Some(entry);
    }
}
