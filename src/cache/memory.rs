//! In-memory cache implementation
//!
//! A bounded LRU map behind a single mutex. Expired entries are dropped lazily
//! on read and swept on every write.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Cache entry
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= Instant::now())
    }
}

/// In-memory cache implementation
pub struct MemoryCache {
    cache: Mutex<LruCache<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create a new memory cache holding at most `max_size` entries
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Remove expired entries
    fn cleanup(cache: &mut LruCache<String, CacheEntry>) {
        let expired: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            cache.pop(&key);
        }
    }
}

#[async_trait::async_trait]
impl super::Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut cache = self.cache.lock();
        let expired = cache.peek(key)?.is_expired();
        if expired {
            cache.pop(key);
            return None;
        }
        cache.get(key).map(|entry| entry.value.clone())
    }

    async fn set(&self, key: String, value: String, ttl: Option<Duration>) {
        // a deadline past what `Instant` can represent never expires
        let expires_at = ttl.and_then(|duration| Instant::now().checked_add(duration));
        let entry = CacheEntry { value, expires_at };

        let mut cache = self.cache.lock();
        Self::cleanup(&mut cache);
        // `put` evicts the least recently used entry once capacity is reached
        cache.put(key, entry);
    }

    fn entry_count(&self) -> usize {
        self.cache.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_memory_cache_basic() {
        let cache = MemoryCache::new(10);
        assert_eq!(cache.entry_count(), 0);

        cache.set("key1".to_string(), "value1".to_string(), None).await;
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));
        assert_eq!(cache.get("key2").await, None);
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_cache_unrepresentable_ttl_never_expires() {
        let cache = MemoryCache::new(10);
        cache
            .set(
                "key".to_string(),
                "value".to_string(),
                Some(Duration::from_secs(u64::MAX)),
            )
            .await;
        assert_eq!(cache.get("key").await, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_memory_cache_overwrite() {
        let cache = MemoryCache::new(10);
        cache.set("key".to_string(), "old".to_string(), None).await;
        cache.set("key".to_string(), "new".to_string(), None).await;
        assert_eq!(cache.get("key").await, Some("new".to_string()));
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_cache_ttl() {
        let cache = MemoryCache::new(10);

        cache
            .set(
                "key1".to_string(),
                "value1".to_string(),
                Some(Duration::from_millis(100)),
            )
            .await;
        assert_eq!(cache.get("key1").await, Some("value1".to_string()));

        sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.get("key1").await, None);
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_memory_cache_sweeps_expired_on_write() {
        let cache = MemoryCache::new(10);
        cache
            .set("short".to_string(), "v".to_string(), Some(Duration::from_millis(50)))
            .await;
        sleep(Duration::from_millis(80)).await;

        cache.set("other".to_string(), "v".to_string(), None).await;
        assert_eq!(cache.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_cache_evicts_least_recently_used() {
        let cache = MemoryCache::new(2);

        cache.set("key1".to_string(), "value1".to_string(), None).await;
        cache.set("key2".to_string(), "value2".to_string(), None).await;
        // touch key1 so key2 becomes the eviction candidate
        assert!(cache.get("key1").await.is_some());
        cache.set("key3".to_string(), "value3".to_string(), None).await;

        assert_eq!(cache.entry_count(), 2);
        assert!(cache.get("key1").await.is_some());
        assert!(cache.get("key2").await.is_none());
        assert!(cache.get("key3").await.is_some());
    }
}
