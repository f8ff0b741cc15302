use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),

    #[error("Invalidation error: {0}")]
    InvalidationError(#[from] moka::PredicateError),
}

impl CacheError {
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::CacheMiss(_))
    }
}

/// Two-tier cache for computed recommendation lists
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Both tiers expire entries after the same TTL.
///
/// Keys embed a per-user generation kept in Redis. Invalidation bumps the
/// generation, so every instance stops reading its old L1 entries and a list
/// computed before the bump is written under a key nobody reads again.
pub struct CacheManager {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            l1_cache,
            ttl_secs,
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let mut conn = self.redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let parsed = serde_json::from_str(&json)?;
                self.l1_cache.insert(key.to_string(), json.into_bytes()).await;
                Ok(parsed)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Set a value in both tiers
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache.insert(key.to_string(), json.as_bytes().to_vec()).await;

        let mut conn = self.redis.lock().await;
        redis::cmd("SETEX")
            .arg(key)
            .arg(self.ttl_secs)
            .arg(json)
            .query_async::<()>(&mut *conn)
            .await?;

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Current cache generation of a user, 0 until the first invalidation
    pub async fn generation(&self, user_id: &str) -> Result<u64, CacheError> {
        let mut conn = self.redis.lock().await;
        let generation: Option<u64> = redis::cmd("GET")
            .arg(CacheKey::generation(user_id))
            .query_async(&mut *conn)
            .await?;

        Ok(generation.unwrap_or(0))
    }

    /// Drop every cached recommendation list of a user, whatever its limit
    pub async fn invalidate_user(&self, user_id: &str) -> Result<(), CacheError> {
        let mut conn = self.redis.lock().await;
        let generation: u64 = redis::cmd("INCR")
            .arg(CacheKey::generation(user_id))
            .query_async(&mut *conn)
            .await?;

        let prefix = CacheKey::recommendations_prefix(user_id);
        self.l1_cache
            .invalidate_entries_if(move |key, _| key.starts_with(&prefix))?;

        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(CacheKey::recommendations_pattern(user_id))
            .query_async(&mut *conn)
            .await?;

        if !keys.is_empty() {
            redis::cmd("DEL")
                .arg(&keys)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::debug!(
            "Invalidated {} cached recommendation lists for {} (generation {})",
            keys.len(),
            user_id,
            generation
        );
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a recommendation list
    pub fn recommendations(user_id: &str, generation: u64, limit: usize) -> String {
        format!("{}{}:{}", Self::recommendations_prefix(user_id), generation, limit)
    }

    /// Counter bumped on every invalidation of the user's lists
    pub fn generation(user_id: &str) -> String {
        format!("recommendations_gen:{}", user_id)
    }

    fn recommendations_prefix(user_id: &str) -> String {
        format!("recommendations:{}:", user_id)
    }

    fn recommendations_pattern(user_id: &str) -> String {
        format!("{}*", Self::recommendations_prefix(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_cache_set_get_invalidate() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let generation = cache.generation("user123").await.unwrap();
        let key = CacheKey::recommendations("user123", generation, 10);
        let value = vec!["a".to_string(), "b".to_string()];

        cache.set(&key, &value).await.unwrap();
        let result: Vec<String> = cache.get(&key).await.unwrap();
        assert_eq!(result, value);

        cache.invalidate_user("user123").await.unwrap();
        let err = cache.get::<Vec<String>>(&key).await.unwrap_err();
        assert!(err.is_miss());

        // A list computed before the invalidation lands under the old generation
        let bumped = cache.generation("user123").await.unwrap();
        assert_eq!(bumped, generation + 1);
        cache.set(&key, &value).await.unwrap();
        let fresh_key = CacheKey::recommendations("user123", bumped, 10);
        assert!(cache.get::<Vec<String>>(&fresh_key).await.unwrap_err().is_miss());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::recommendations("user123", 0, 10), "recommendations:user123:0:10");
        assert_eq!(CacheKey::recommendations_pattern("user123"), "recommendations:user123:*");
        assert_eq!(CacheKey::generation("user123"), "recommendations_gen:user123");
    }

    #[test]
    fn test_generation_key_outside_invalidation_pattern() {
        let prefix = CacheKey::recommendations_prefix("user123");
        assert!(!CacheKey::generation("user123").starts_with(&prefix));
        assert_ne!(
            CacheKey::recommendations("user123", 0, 10),
            CacheKey::recommendations("user123", 1, 10)
        );
    }
}
