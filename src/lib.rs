//! Redis Extensions - convenience layer over Redis-style key-value stores
//!
//! Provides cache-aside retrieval with opaque serialization, batched key
//! scanning, bulk hash writes and lenient typed getters, all over a
//! pluggable [`Store`] backend with Redis and in-memory implementations.

pub mod cache;
pub mod config;
pub mod error;
pub mod ext;
pub mod scanner;
pub mod store;
pub mod tasks;

pub use cache::{CacheStats, SerializedCache};
pub use config::RedisConfig;
pub use error::{Result, StoreError};
pub use ext::StoreExt;
pub use scanner::BatchScanner;
pub use store::{MemoryStore, RedisStore, Store, SCAN_CURSOR_START};
pub use tasks::spawn_sweeper_task;
