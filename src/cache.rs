//! TTL cache for rendered vanity pages.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// How long a rendered page stays cached, matching its Cache-Control max-age.
pub const META_TTL: Duration = Duration::from_secs(3600);

/// URL-keyed cache of rendered vanity pages.
///
/// Stand-in for an edge cache: reads are awaited on the request path, writes
/// happen off it. Clones are cheap and share one store.
#[derive(Debug, Clone, Default)]
pub struct MetaCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

impl MetaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body for `key` unless missing or expired.
    pub async fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.body.clone())
    }

    /// Stores `body` under `key` for `ttl`.
    ///
    /// Expired entries are dropped while the write lock is held, keeping the
    /// map bounded by the set of keys seen within one TTL window.
    pub async fn put(&self, key: String, body: String, ttl: Duration) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            CacheEntry {
                body,
                expires_at: now + ttl,
            },
        );
    }
}
