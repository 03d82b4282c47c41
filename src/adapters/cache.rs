use crate::domain::ports::Cache;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: String) {}
}

struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

/// Bounded LRU cache shared by all request handlers.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    pub fn new(capacity: NonZeroUsize, ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl
            .map(|ttl| entry.inserted_at.elapsed() >= ttl)
            .unwrap_or(false)
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) if !self.is_expired(entry) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
            tracing::debug!(key, "evicted expired cache entry");
        }
        None
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().put(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }
}

/// Capacity 0 disables caching.
pub fn build_cache(capacity: usize, ttl_secs: Option<u64>) -> Arc<dyn Cache> {
    match NonZeroUsize::new(capacity) {
        Some(capacity) => {
            tracing::info!(capacity = capacity.get(), ttl_secs, "response cache enabled");
            Arc::new(MemoryCache::new(capacity, ttl_secs.map(Duration::from_secs)))
        }
        None => Arc::new(NoCache),
    }
}
