//! Cache module
//!
//! Process-local storage for query results. Nothing is persisted across restarts.

pub mod memory;

use std::time::Duration;

/// Cache trait
#[async_trait::async_trait]
pub trait Cache: Send + Sync {
    /// Get a cached value
    async fn get(&self, key: &str) -> Option<String>;

    /// Set a cached value, overwriting any previous value for `key`
    async fn set(&self, key: String, value: String, ttl: Option<Duration>);

    /// Number of entries currently held, expired ones included
    fn entry_count(&self) -> usize;
}

/// Cache configuration
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache type, only `memory` is supported
    pub cache_type: String,

    /// Maximum number of entries kept in memory
    pub memory_size: Option<usize>,

    /// Freshness window in seconds
    pub default_ttl: Option<u64>,
}

impl CacheConfig {
    /// Default freshness window for cached query results
    pub const DEFAULT_TTL_SECS: u64 = 300;

    /// Default entry bound for the memory cache
    pub const DEFAULT_MEMORY_SIZE: usize = 1000;

    /// Freshness window as a [`Duration`]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl.unwrap_or(Self::DEFAULT_TTL_SECS))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: "memory".to_string(),
            memory_size: Some(Self::DEFAULT_MEMORY_SIZE),
            default_ttl: Some(Self::DEFAULT_TTL_SECS),
        }
    }
}

/// Create a cache instance
///
/// # Errors
///
/// Returns an error if the cache type is not supported
pub fn create_cache(config: &CacheConfig) -> Result<Box<dyn Cache>, crate::error::Error> {
    match config.cache_type.as_str() {
        "memory" => {
            let size = config.memory_size.unwrap_or(CacheConfig::DEFAULT_MEMORY_SIZE);
            Ok(Box::new(memory::MemoryCache::new(size)))
        }
        _ => Err(crate::error::Error::Config(format!(
            "unsupported cache type: {}",
            config.cache_type
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cache_rejects_unknown_type() {
        let config = CacheConfig {
            cache_type: "redis".to_string(),
            ..CacheConfig::default()
        };
        assert!(create_cache(&config).is_err());
    }

    #[test]
    fn test_default_ttl_is_five_minutes() {
        assert_eq!(CacheConfig::default().ttl(), Duration::from_secs(300));
        let config = CacheConfig {
            default_ttl: None,
            ..CacheConfig::default()
        };
        assert_eq!(config.ttl(), Duration::from_secs(300));
    }
}
