//! Cache Module
//!
//! Provides cache-aside retrieval with opaque JSON serialization over any
//! store backend, plus hit/miss statistics.

mod serialized;
mod stats;

// Re-export public types
pub use serialized::SerializedCache;
pub use stats::CacheStats;
