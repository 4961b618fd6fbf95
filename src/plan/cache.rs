// src/plan/cache.rs

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::debug;

use crate::plan::types::Plan;
use crate::unit::UnitKey;

struct CacheEntry<C, A> {
    plan: Arc<Plan<C, A>>,
    inserted_at: Instant,
}

/// Bounded, time-expiring map from a resolved node's identity to its last
/// computed plan.
///
/// Capacity overflow evicts the least-recently-used entry. A hit refreshes
/// recency but never the expiry clock: an entry's age is always measured
/// from insertion. Graph edits do not invalidate entries; staleness is
/// bounded only by time and capacity.
pub struct PlanCache<C, A = ()> {
    entries: LruCache<UnitKey, CacheEntry<C, A>>,
    ttl: Option<Duration>,
}

impl<C, A> PlanCache<C, A> {
    pub fn new(capacity: NonZeroUsize, ttl: Option<Duration>) -> Self {
        Self {
            entries: LruCache::new(capacity),
            ttl,
        }
    }

    pub fn get(&mut self, key: &UnitKey) -> Option<Arc<Plan<C, A>>> {
        let expired = match self.entries.get(key) {
            Some(entry) => self
                .ttl
                .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl),
            None => return None,
        };

        if expired {
            debug!(?key, "plan cache entry expired");
            self.entries.pop(key);
            return None;
        }

        // The lru get above already refreshed recency.
        self.entries.get(key).map(|e| Arc::clone(&e.plan))
    }

    pub fn put(&mut self, key: UnitKey, plan: Arc<Plan<C, A>>) {
        debug!(?key, layers = plan.depth(), "plan cached");
        self.entries.put(
            key,
            CacheEntry {
                plan,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
