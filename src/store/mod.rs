//! Store Module
//!
//! Defines the key-value store abstraction the extension layer builds on,
//! plus the two shipped backends: a Redis client and an in-memory store
//! with TTL expiration.

use async_trait::async_trait;

use crate::error::Result;

mod entry;
mod glob;
mod memory;
mod redis;


// Re-export public types
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

// == Public Constants ==
/// Cursor value that both starts a scan and signals its completion.
pub const SCAN_CURSOR_START: u64 = 0;

/// Number of keys a scan page examines when the caller gives no count hint.
pub const DEFAULT_SCAN_PAGE: usize = 10;

// == Store Trait ==
/// Minimal async interface over a Redis-style key-value store.
///
/// Every operation the extension layer performs goes through this trait, so
/// callers can swap the real Redis backend for [`MemoryStore`] in tests
/// without touching their own code.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetches the raw bytes stored at `key`.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` if the key exists, whatever the stored payload is
    /// - `Ok(None)` if the key is absent or has expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores raw bytes at `key`, replacing any previous value.
    ///
    /// Overwriting discards any TTL the key previously carried.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Sets the time-to-live of `key` to `seconds` from now.
    ///
    /// Missing keys are left untouched and no error is reported.
    async fn expire(&self, key: &str, seconds: u64) -> Result<()>;

    /// Removes `key` from the store.
    ///
    /// Deleting a missing key is not an error.
    async fn del(&self, key: &str) -> Result<()>;

    /// Walks one page of the keyspace.
    ///
    /// # Arguments
    /// * `cursor` - Position token from the previous call, or
    ///   [`SCAN_CURSOR_START`] to begin a new scan
    /// * `pattern` - Glob filter (`*` matches any run, `?` a single character)
    /// * `count` - Optional hint for how many keys to examine this page
    ///
    /// # Returns
    /// The cursor for the next call and the matching keys of this page. A
    /// returned cursor equal to [`SCAN_CURSOR_START`] means the scan is
    /// complete. Pages may be empty even while the scan continues.
    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: Option<usize>,
    ) -> Result<(u64, Vec<String>)>;

    /// Writes several field/value pairs into the hash stored at `key`.
    ///
    /// Creates the hash if the key is absent. Existing fields are
    /// overwritten, other fields are left alone.
    async fn hset_many(&self, key: &str, fields: &[(String, String)]) -> Result<()>;
}
