//! Store Entry Module
//!
//! Defines the structure for individual in-memory entries with TTL support.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Value ==
/// Payload held at a key. Redis keys are typed, so a key holds either a
/// plain byte string or a hash of fields, never both.
#[derive(Debug, Clone)]
pub enum StoredValue {
    /// Opaque byte string written by `set`
    Bytes(Vec<u8>),
    /// Field/value map written by `hset_many`
    Hash(HashMap<String, String>),
}

// == Stored Entry ==
/// A single in-memory entry with its expiration metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored payload
    pub value: StoredValue,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry without an expiration.
    ///
    /// TTLs are attached afterwards through [`StoredEntry::set_expiry`],
    /// mirroring how EXPIRE is a separate command from SET.
    pub fn new(value: StoredValue) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    // == Set Expiry ==
    /// Schedules the entry to expire `ttl_seconds` from now.
    pub fn set_expiry(&mut self, ttl_seconds: u64) {
        self.expires_at = Some(current_timestamp_ms() + ttl_seconds * 1000);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: An entry is considered expired when the current time
    /// is greater than or equal to the expiration time. This ensures that once
    /// the TTL duration has fully elapsed, the entry is immediately expired.
    ///
    /// # Returns
    /// - `true` if the entry has a TTL and the current time >= expiration time
    /// - `false` if the entry has no TTL (never expires) or TTL hasn't elapsed
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at.map(|expires| {
            let now = current_timestamp_ms();
            if expires > now {
                expires - now
            } else {
                0
            }
        })
    }

    /// Returns remaining TTL in seconds, or None if no expiration is set.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.ttl_remaining_ms().map(|ms| ms / 1000)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
