//! Response cache keyed by endpoint path
//!
//! Provides a `ResponseCache` that stores JSON responses in a [`KeyValueStore`]
//! together with the time they were stored. Entries older than the TTL are
//! treated as absent and purged on the next read.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::{KeyValueStore, MemoryStore};

/// Prefix reserved for keys owned by the response cache
pub const CACHE_PREFIX: &str = "airport_cache_";

/// How long a cached response stays fresh
pub const DEFAULT_TTL: Duration = Duration::minutes(5);

/// Wrapper struct for cached data held in the store
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data
    pub data: T,
    /// When the data was cached
    pub timestamp: DateTime<Utc>,
}

/// Returns the store key for an endpoint path
pub fn cache_key(path: &str) -> String {
    format!("{}{}", CACHE_PREFIX, path)
}

/// Read-through cache for GET responses
///
/// Cloning yields another handle onto the same store. Failures to read or
/// write the store never surface to callers: a corrupt entry is a miss and a
/// failed write is dropped.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache").field("ttl", &self.ttl).finish()
    }
}

impl ResponseCache {
    /// Creates a cache over the given store with the default 5 minute TTL
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ttl: DEFAULT_TTL,
        }
    }

    /// Creates a cache that only lives in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Overrides the freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The freshness window in use
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Returns the cached response for `path` if it is still fresh
    ///
    /// Expired entries are removed from the store before returning `None`.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.get_at(path, Utc::now())
    }

    fn get_at(&self, path: &str, now: DateTime<Utc>) -> Option<Value> {
        let key = cache_key(path);
        let content = self.store.get(&key)?;

        let entry: CacheEntry<Value> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(path, error = %err, "ignoring unreadable cache entry");
                return None;
            }
        };

        if now - entry.timestamp > self.ttl {
            tracing::debug!(path, cached_at = %entry.timestamp, "cache entry expired");
            self.store.remove(&key);
            return None;
        }

        tracing::debug!(path, "cache hit");
        Some(entry.data)
    }

    /// Stores `data` for `path`, stamped with the current time
    pub fn set(&self, path: &str, data: &Value) {
        self.set_at(path, data, Utc::now());
    }

    /// Stores `data` for `path` with an explicit timestamp
    pub fn set_at(&self, path: &str, data: &Value, timestamp: DateTime<Utc>) {
        let entry = CacheEntry { data, timestamp };
        let result = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            .and_then(|json| self.store.set(&cache_key(path), &json));

        if let Err(err) = result {
            tracing::warn!(path, error = %err, "failed to write cache entry");
        }
    }

    /// Timestamp of the stored entry for `path`, fresh or not
    pub fn stored_at(&self, path: &str) -> Option<DateTime<Utc>> {
        let content = self.store.get(&cache_key(path))?;
        let entry: CacheEntry<Value> = serde_json::from_str(&content).ok()?;
        Some(entry.timestamp)
    }

    /// Removes the entry for `path`, or every entry this cache owns when `path` is `None`
    ///
    /// Keys without the reserved prefix are left untouched.
    pub fn invalidate(&self, path: Option<&str>) {
        match path {
            Some(path) => self.store.remove(&cache_key(path)),
            None => {
                for key in self
                    .store
                    .keys()
                    .into_iter()
                    .filter(|key| key.starts_with(CACHE_PREFIX))
                {
                    self.store.remove(&key);
                }
            }
        }
    }
}
