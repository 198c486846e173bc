use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

use super::normalize::collection_items;

/// Upper bound on cached responses. Slug lookups are keyed by user input, so
/// the map must not grow with every distinct URL.
pub const MAX_CACHE_ENTRIES: usize = 256;

#[derive(Debug, Clone)]
struct CachedResponse {
    fetched_at: Instant,
    body: Value,
}

/// TTL cache of CMS response bodies, shared by every clone of the client.
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, CachedResponse>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str, now: Instant) -> Option<Value> {
        let hit = self.entries.get(key)?;
        (now.saturating_duration_since(hit.fetched_at) < self.ttl).then(|| hit.body.clone())
    }

    /// Stores `body` under `key`. Empty collections are not cached, and
    /// expired entries are dropped first. Returns whether the body was kept.
    pub fn store(&self, key: String, body: &Value, now: Instant) -> bool {
        if collection_items(body).is_empty() {
            return false;
        }
        self.entries
            .retain(|_, cached| now.saturating_duration_since(cached.fetched_at) < self.ttl);
        if self.entries.len() >= MAX_CACHE_ENTRIES && !self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(
            key,
            CachedResponse {
                fetched_at: now,
                body: body.clone(),
            },
        );
        true
    }
}
