//! Query result cache
//!
//! Successful results are stored under the exact `(working directory, argument list)`
//! pair that produced them and served again while younger than the freshness window.

use crate::cache::Cache;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Invocation signature of a query
///
/// Equality is structural: flag order and path spelling are not normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationKey {
    /// Directory the command runs in
    pub working_dir: String,
    /// Arguments after the subcommand, in order
    pub args: Vec<String>,
}

impl InvocationKey {
    /// Create a new invocation key
    pub fn new(working_dir: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            working_dir: working_dir.into(),
            args,
        }
    }

    /// Storage key; JSON encoding keeps `["a b"]` and `["a", "b"]` apart
    fn cache_key(&self) -> Result<String> {
        Ok(format!("invocation:{}", serde_json::to_string(self)?))
    }
}

/// A cached query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Command output
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Length of `content` in bytes
    pub size_bytes: usize,
}

impl CacheEntry {
    /// Create an entry stamped with the current time
    #[must_use]
    pub fn new(content: String) -> Self {
        Self {
            size_bytes: content.len(),
            created_at: Utc::now(),
            content,
        }
    }

    /// Time elapsed since creation
    #[must_use]
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.created_at)
            .to_std()
            .unwrap_or_default()
    }

    /// Whether the entry is younger than `window`
    #[must_use]
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.age() < window
    }
}

/// Query result cache
#[derive(Clone)]
pub struct QueryCache {
    cache: Arc<dyn Cache>,
    freshness: Duration,
}

impl QueryCache {
    /// Create a query cache over `cache` with the given freshness window
    pub fn new(cache: Arc<dyn Cache>, freshness: Duration) -> Self {
        Self { cache, freshness }
    }

    /// Look up a fresh entry for `key`
    pub async fn lookup(&self, key: &InvocationKey) -> Option<CacheEntry> {
        let storage_key = match key.cache_key() {
            Ok(storage_key) => storage_key,
            Err(e) => {
                tracing::warn!("failed to encode cache key: {e}");
                return None;
            }
        };

        let raw = self.cache.get(&storage_key).await?;
        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("discarding unreadable cache entry: {e}");
                return None;
            }
        };

        entry.is_fresh(self.freshness).then_some(entry)
    }

    /// Store `content` under `key`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be encoded
    pub async fn store(&self, key: &InvocationKey, content: String) -> Result<CacheEntry> {
        let entry = CacheEntry::new(content);
        let raw = serde_json::to_string(&entry)?;
        self.cache
            .set(key.cache_key()?, raw, Some(self.freshness))
            .await;
        tracing::trace!(entries = self.cache.entry_count(), "stored query result");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;

    fn query_cache(freshness: Duration) -> QueryCache {
        QueryCache::new(Arc::new(MemoryCache::new(100)), freshness)
    }

    #[tokio::test]
    async fn test_store_then_lookup() {
        let cache = query_cache(Duration::from_secs(300));
        let key = InvocationKey::new("/work", vec!["io".to_string()]);

        assert!(cache.lookup(&key).await.is_none());
        let stored = cache.store(&key, "package io".to_string()).await.unwrap();
        assert_eq!(stored.size_bytes, 10);

        let entry = cache.lookup(&key).await.unwrap();
        assert_eq!(entry.content, "package io");
        assert_eq!(entry, stored);
    }

    #[tokio::test]
    async fn test_keys_are_exact() {
        let cache = query_cache(Duration::from_secs(300));
        let key = InvocationKey::new("/work", vec!["-u".to_string(), "-src".to_string()]);
        cache.store(&key, "docs".to_string()).await.unwrap();

        let reordered = InvocationKey::new("/work", vec!["-src".to_string(), "-u".to_string()]);
        let other_dir = InvocationKey::new("/work/", vec!["-u".to_string(), "-src".to_string()]);
        let joined = InvocationKey::new("/work", vec!["-u -src".to_string()]);

        assert!(cache.lookup(&reordered).await.is_none());
        assert!(cache.lookup(&other_dir).await.is_none());
        assert!(cache.lookup(&joined).await.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let cache = query_cache(Duration::from_secs(300));
        let key = InvocationKey::new("/work", vec!["fmt".to_string()]);
        cache.store(&key, "first".to_string()).await.unwrap();
        cache.store(&key, "second".to_string()).await.unwrap();
        assert_eq!(cache.lookup(&key).await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn test_stale_entry_is_a_miss() {
        let cache = query_cache(Duration::from_millis(100));
        let key = InvocationKey::new("/work", vec!["io".to_string()]);
        cache.store(&key, "package io".to_string()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.lookup(&key).await.is_none());
    }

    #[test]
    fn test_entry_freshness() {
        let mut entry = CacheEntry::new("x".to_string());
        assert!(entry.is_fresh(Duration::from_secs(300)));

        entry.created_at = Utc::now() - chrono::Duration::minutes(6);
        assert!(!entry.is_fresh(Duration::from_secs(300)));
        assert!(entry.age() >= Duration::from_secs(360));
    }
}
