//! Cache Statistics Module
//!
//! Point-in-time snapshot of cache performance counters.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of hit and miss counters taken by
/// [`SerializedCache::stats`](crate::cache::SerializedCache::stats).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of fetches answered from the store
    pub hits: u64,
    /// Number of fetches that had to compute a fresh value
    pub misses: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no fetches have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
