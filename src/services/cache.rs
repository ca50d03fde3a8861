use crate::models::PandalQuery;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process cache for store snapshots
///
/// Holds the last successful listing per query and recently fetched pandal
/// documents. Discovery falls back to these snapshots when the store is
/// unreachable.
pub struct CacheManager {
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { l1_cache, ttl_secs }
    }

    /// Get a value from cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.l1_cache.insert(key.to_string(), bytes).await;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the listing snapshot of a query
    ///
    /// The bounding box is left out: it follows the user's exact location,
    /// so one snapshot serves every location with the same predicates.
    pub fn snapshot(query: &PandalQuery) -> String {
        let predicates = PandalQuery {
            bounding_box: None,
            ..query.clone()
        };
        format!("pandals:{}", serde_json::to_string(&predicates).unwrap_or_default())
    }

    /// Build a cache key for a single pandal, by id or slug
    pub fn pandal(key: &str) -> String {
        format!("pandal:{}", key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculate_bounding_box;
    use crate::models::{Area, Coordinate};

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = CacheManager::new(100, 60);

        let key = "test_key";
        let value = "test_value".to_string();

        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        assert!(matches!(cache.get::<String>("missing").await, Err(CacheError::CacheMiss(_))));
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::pandal("bagbazar"), "pandal:bagbazar");

        let south = PandalQuery {
            area: Some(Area::South),
            ..Default::default()
        };
        assert_ne!(CacheKey::snapshot(&south), CacheKey::snapshot(&PandalQuery::default()));
        assert!(CacheKey::snapshot(&south).starts_with("pandals:"));
    }

    #[test]
    fn test_snapshot_key_ignores_location() {
        let here = PandalQuery {
            area: Some(Area::North),
            bounding_box: Some(calculate_bounding_box(
                Coordinate { latitude: 22.6009, longitude: 88.3746 },
                3.0,
            )),
            ..Default::default()
        };
        let there = PandalQuery {
            bounding_box: Some(calculate_bounding_box(
                Coordinate { latitude: 22.6021, longitude: 88.3702 },
                3.0,
            )),
            ..here.clone()
        };

        assert_eq!(CacheKey::snapshot(&here), CacheKey::snapshot(&there));
    }
}
