//! In-Memory Store Module
//!
//! HashMap-backed [`Store`] implementation with TTL expiration. Behaves like
//! a small slice of Redis, which makes it the drop-in backend for tests and
//! single-process deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::entry::{StoredEntry, StoredValue};
use super::glob::glob_to_regex;
use super::{Store, DEFAULT_SCAN_PAGE, SCAN_CURSOR_START};
use crate::error::{Result, StoreError};

// == Memory Store ==
/// Shared in-memory store.
///
/// Clones are cheap handles onto the same underlying data, so a
/// `MemoryStore` can be passed around the way a Redis client handle would
/// be. Expired entries are dropped lazily on access and eagerly by
/// [`MemoryStore::purge_expired`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Key-value storage guarded for concurrent access
    entries: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty MemoryStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;

        let expired_keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            entries.remove(&key);
        }

        count
    }

    // == Hash Field Lookup ==
    /// Reads a single field from the hash stored at `key`.
    ///
    /// Returns None if the key is absent, expired, holds a non-hash value,
    /// or the field does not exist.
    pub async fn hget(&self, key: &str, field: &str) -> Option<String> {
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) if !entry.is_expired() => match &entry.value {
                StoredValue::Hash(map) => map.get(field).cloned(),
                StoredValue::Bytes(_) => None,
            },
            _ => None,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL of `key` in seconds.
    ///
    /// Returns None for missing keys, expired keys, and keys without an
    /// expiration.
    pub async fn ttl(&self, key: &str) -> Option<u64> {
        let entries = self.entries.read().await;

        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(|entry| entry.ttl_remaining())
    }

    // == Length ==
    /// Returns the number of entries currently held, including any expired
    /// entries that have not been swept yet.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// == Store Implementation ==
#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                return Ok(None);
            }

            return match &entry.value {
                StoredValue::Bytes(bytes) => Ok(Some(bytes.clone())),
                StoredValue::Hash(_) => Err(StoreError::WrongType(key.to_string())),
            };
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self.entries.write().await;

        // A plain set always replaces the entry, clearing any previous TTL
        entries.insert(
            key.to_string(),
            StoredEntry::new(StoredValue::Bytes(value.to_vec())),
        );

        Ok(())
    }

    async fn expire(&self, key: &str, seconds: u64) -> Result<()> {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.get_mut(key) {
            if entry.is_expired() {
                // Already past its TTL, treat it like a missing key
                entries.remove(key);
            } else {
                entry.set_expiry(seconds);
            }
        }

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: Option<usize>,
    ) -> Result<(u64, Vec<String>)> {
        let entries = self.entries.read().await;

        // Snapshot the live keys in a stable order so the cursor can act as
        // an index into that ordering across calls.
        let mut live: Vec<&String> = entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key)
            .collect();
        live.sort();

        let start = cursor as usize;
        if start >= live.len() {
            return Ok((SCAN_CURSOR_START, Vec::new()));
        }

        let page = count.unwrap_or(DEFAULT_SCAN_PAGE).max(1);
        let end = (start + page).min(live.len());

        let keys: Vec<String> = if pattern == "*" {
            live[start..end].iter().map(|key| key.to_string()).collect()
        } else {
            let matcher = glob_to_regex(pattern);
            live[start..end]
                .iter()
                .filter(|key| matcher.is_match(key.as_str()))
                .map(|key| key.to_string())
                .collect()
        };

        let next = if end == live.len() {
            SCAN_CURSOR_START
        } else {
            end as u64
        };

        Ok((next, keys))
    }

    async fn hset_many(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        let mut entries = self.entries.write().await;

        // An expired entry must not influence the key's type
        if entries.get(key).map_or(false, |entry| entry.is_expired()) {
            entries.remove(key);
        }

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| StoredEntry::new(StoredValue::Hash(HashMap::new())));

        match &mut entry.value {
            StoredValue::Hash(map) => {
                for (field, value) in fields {
                    map.insert(field.clone(), value.clone());
                }
                Ok(())
            }
            StoredValue::Bytes(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }
}
