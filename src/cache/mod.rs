//! Cache module for storing API responses locally
//!
//! This module provides a read-through response cache keyed by endpoint path.
//! Entries carry the time they were stored and expire after a fixed freshness
//! window (5 minutes by default). Storage goes through a pluggable key-value
//! store so the same cache works on disk and in memory.

mod manager;
mod store;

pub use manager::{cache_key, CacheEntry, ResponseCache, CACHE_PREFIX, DEFAULT_TTL};
pub use store::{FileStore, KeyValueStore, MemoryStore};
