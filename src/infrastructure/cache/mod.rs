//! Resolved URL caching.

pub mod memory_cache;

pub use memory_cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, MemoryUrlCache};
