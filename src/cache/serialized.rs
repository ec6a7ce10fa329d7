//! Serialized Cache Module
//!
//! Cache-aside retrieval with opaque JSON payloads over any Store backend.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::CacheStats;
use crate::error::{Result, StoreError};
use crate::store::Store;

// == Serialized Cache ==
/// Read-through cache over a [`Store`].
///
/// Values are serialized to JSON on the way in and deserialized on the way
/// out, so callers work with their own types and never see the stored
/// bytes. Presence is decided by key existence alone: a cached `false`,
/// `0` or `None` is a normal hit, not a miss.
pub struct SerializedCache<S> {
    /// Backend the payloads live in
    store: S,
    /// Number of fetches answered from the store
    hits: AtomicU64,
    /// Number of fetches that computed a fresh value
    misses: AtomicU64,
}

impl<S: Store> SerializedCache<S> {
    // == Constructor ==
    /// Wraps `store` in a new cache with zeroed counters.
    pub fn new(store: S) -> Self {
        Self {
            store,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    // == Fetch ==
    /// Returns the value cached at `key`, computing and caching it on a miss.
    ///
    /// On a miss the `compute` future runs, its result is written to the
    /// store and given a TTL of `ttl_seconds`, and the result is returned.
    /// Two concurrent callers that both miss will both run `compute`; the
    /// last write wins. The write and the TTL are two separate store
    /// commands, so a crash between them can leave the key without an
    /// expiry.
    ///
    /// A payload that exists but fails to decode is reported as an error,
    /// not treated as a miss, since recomputing would silently mask
    /// corruption or a type mismatch.
    ///
    /// # Arguments
    /// * `key` - Cache key, must not be empty
    /// * `ttl_seconds` - Lifetime of a freshly computed value, must be > 0
    /// * `compute` - Called only on a miss to produce the value
    pub async fn fetch<T, F, Fut>(&self, key: &str, ttl_seconds: u64, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if key.is_empty() {
            return Err(StoreError::InvalidArgument(
                "cache key must not be empty".to_string(),
            ));
        }
        if ttl_seconds == 0 {
            return Err(StoreError::InvalidArgument(
                "ttl must be at least one second".to_string(),
            ));
        }

        if let Some(value) = self.load(key).await? {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("cache hit for '{}'", key);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("cache miss for '{}', computing value", key);

        let value = compute().await;
        self.store(key, &value).await?;
        self.store.expire(key, ttl_seconds).await?;

        Ok(value)
    }

    // == Load ==
    /// Reads and decodes the value at `key`.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists and decodes into `T`
    /// - `Ok(None)` if the key is absent
    /// - `Err` if the payload exists but cannot be decoded
    pub async fn load<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let raw = match self.store.get(key).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let value = serde_json::from_slice(&raw).map_err(|source| StoreError::Deserialize {
            key: key.to_string(),
            source,
        })?;

        Ok(Some(value))
    }

    // == Store ==
    /// Encodes `value` and writes it at `key`, without touching any TTL.
    pub async fn store<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        self.store.set(key, &payload).await
    }

    // == Stats ==
    /// Returns a snapshot of the hit and miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde::Deserialize;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u32,
    }

    #[tokio::test]
    async fn test_fetch_miss_computes_then_hit_skips_compute() {
        let cache = SerializedCache::new(MemoryStore::new());
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let calls = calls.clone();
            let value: u32 = cache
                .fetch("answer", 60, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    42
                })
                .await
                .unwrap();
            assert_eq!(value, 42);
        }

        // The second fetch was served from the store
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[tokio::test]
    async fn test_fetch_sets_ttl_on_computed_value() {
        let store = MemoryStore::new();
        let cache = SerializedCache::new(store.clone());

        let _: String = cache
            .fetch("greeting", 60, || async { "hello".to_string() })
            .await
            .unwrap();

        let remaining = store.ttl("greeting").await.unwrap();
        assert!(remaining <= 60);
        assert!(remaining >= 59);
    }

    #[tokio::test]
    async fn test_fetch_cached_false_is_a_hit() {
        let cache = SerializedCache::new(MemoryStore::new());

        cache.store("flag", &false).await.unwrap();

        // compute would flip the value, so a hit must return the cached false
        let value: bool = cache.fetch("flag", 60, || async { true }).await.unwrap();

        assert!(!value);
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_fetch_cached_null_is_a_hit() {
        let cache = SerializedCache::new(MemoryStore::new());

        cache.store::<Option<u32>>("maybe", &None).await.unwrap();

        let value: Option<u32> = cache
            .fetch("maybe", 60, || async { Some(7) })
            .await
            .unwrap();

        assert_eq!(value, None);
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_fetch_rejects_empty_key() {
        let cache = SerializedCache::new(MemoryStore::new());

        let result: Result<u32> = cache.fetch("", 60, || async { 1 }).await;

        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_fetch_rejects_zero_ttl() {
        let cache = SerializedCache::new(MemoryStore::new());

        let result: Result<u32> = cache.fetch("key", 0, || async { 1 }).await;

        assert!(matches!(result, Err(StoreError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_fetch_corrupt_payload_is_fatal() {
        let store = MemoryStore::new();
        store.set("broken", b"not json at all").await.unwrap();

        let cache = SerializedCache::new(store);
        let computed = Arc::new(AtomicUsize::new(0));

        let result: Result<Vec<u32>> = {
            let computed = computed.clone();
            cache
                .fetch("broken", 60, move || async move {
                    computed.fetch_add(1, Ordering::SeqCst);
                    vec![1, 2, 3]
                })
                .await
        };

        assert!(matches!(result, Err(StoreError::Deserialize { .. })));
        // The bad payload must not be papered over by recomputing
        assert_eq!(computed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_propagates_wrong_type() {
        let store = MemoryStore::new();
        store
            .hset_many(
                "account",
                &[("name".to_string(), "alice".to_string())],
            )
            .await
            .unwrap();

        let cache = SerializedCache::new(store);
        let result: Result<u32> = cache.fetch("account", 60, || async { 1 }).await;

        assert!(matches!(result, Err(StoreError::WrongType(_))));
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let cache = SerializedCache::new(MemoryStore::new());

        let value: Option<u32> = cache.load("missing").await.unwrap();

        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_store_then_load_roundtrip() {
        let cache = SerializedCache::new(MemoryStore::new());
        let profile = Profile {
            name: "alice".to_string(),
            age: 30,
        };

        cache.store("profile", &profile).await.unwrap();
        let loaded: Profile = cache.load("profile").await.unwrap().unwrap();

        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_store_leaves_key_without_ttl() {
        let store = MemoryStore::new();
        let cache = SerializedCache::new(store.clone());

        cache.store("bare", &123u32).await.unwrap();

        assert_eq!(store.ttl("bare").await, None);
    }
}
