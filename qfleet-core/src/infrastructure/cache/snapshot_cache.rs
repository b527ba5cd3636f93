//! Single-slot time-bounded cache

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    stored_at: DateTime<Utc>,
}

/// Holds at most one value, valid for `ttl` after it was stored.
///
/// Expiry is evaluated against the caller-supplied `now` so tests can drive it
/// from a [`ManualClock`](crate::infrastructure::clock::ManualClock).
#[derive(Debug)]
pub struct SnapshotCache<T: Clone> {
    ttl: Duration,
    slot: RwLock<Option<Slot<T>>>,
}

impl<T: Clone> SnapshotCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// The stored value if it is younger than the TTL
    pub async fn get(&self, now: DateTime<Utc>) -> Option<T> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|slot| now - slot.stored_at < self.ttl)
            .map(|slot| slot.value.clone())
    }

    /// Replace the slot, stamping it with `now`
    pub async fn set(&self, value: T, now: DateTime<Utc>) {
        let mut slot = self.slot.write().await;
        *slot = Some(Slot {
            value,
            stored_at: now,
        });
    }

    pub async fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let slot = self.slot.read().await;
        slot.as_ref()
            .is_none_or(|slot| now - slot.stored_at >= self.ttl)
    }
}
