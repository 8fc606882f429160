//! Port definition for resolved URL caching.

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses, including expired entries.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of stored entries.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} urls, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

/// Port for caching identifier to display URL mappings.
/// Implementations must tolerate interleaved calls from concurrent resolutions.
pub trait UrlCachePort: Send + Sync {
    /// Returns the live URL for `key`, or None if missing or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores a URL for `key`, stamping it with the current time.
    fn put(&self, key: String, url: String);

    /// Removes all entries.
    fn clear(&self);

    /// Returns the number of stored entries.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache counters.
    fn stats(&self) -> CacheStats;
}
