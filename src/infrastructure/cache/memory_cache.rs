//! In-memory bounded URL cache with insertion-order eviction.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::domain::ports::{CacheStats, UrlCachePort};

/// Default maximum number of cached URLs.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Default time-to-live for cached URLs.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
struct CacheEntry {
    url: String,
    inserted_at: Instant,
}

/// Size- and age-bounded map from raw identifier to display URL.
///
/// Entries are never promoted on read, so once full the cache drops the
/// oldest-inserted entry regardless of how often it is hit. Expired entries
/// are removed lazily when looked up; there is no background sweep.
pub struct MemoryUrlCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryUrlCache {
    /// Creates a new cache with the given capacity and time-to-live.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache with the default capacity and time-to-live.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL)
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    fn record_miss(&self, key: &str) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(key, "URL cache miss");
    }
}

impl Default for MemoryUrlCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for MemoryUrlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryUrlCache")
            .field("ttl", &self.ttl)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl UrlCachePort for MemoryUrlCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();

        let Some(entry) = entries.peek(key) else {
            drop(entries);
            self.record_miss(key);
            return None;
        };

        if entry.inserted_at.elapsed() > self.ttl {
            entries.pop(key);
            drop(entries);
            debug!(key, "Dropped expired URL from cache");
            self.record_miss(key);
            return None;
        }

        let url = entry.url.clone();
        drop(entries);
        self.hits.fetch_add(1, Ordering::Relaxed);
        trace!(key, "URL cache hit");
        Some(url)
    }

    fn put(&self, key: String, url: String) {
        let mut entries = self.entries.lock();
        let now = Instant::now();

        // Overwrites keep their original insertion slot.
        if let Some(entry) = entries.peek_mut(&key) {
            entry.url = url;
            entry.inserted_at = now;
            return;
        }

        if let Some((evicted, _)) = entries.push(key, CacheEntry { url, inserted_at: now }) {
            debug!(key = %evicted, "Evicted oldest URL from cache");
        }
    }

    fn clear(&self) {
        self.entries.lock().clear();
        debug!("Cleared URL cache");
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[allow(clippy::cast_precision_loss)]
    fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}
