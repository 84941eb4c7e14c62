//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use emporium_core::{EmporiumResult, Interface};
use metrics::counter;
use std::time::Duration;
use tracing::warn;

/// Cache interface for storing and retrieving cached data.
///
/// Values are stored as JSON strings to keep the trait dyn-compatible.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> EmporiumResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> EmporiumResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> EmporiumResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed helpers over [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> EmporiumResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> EmporiumResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Read-through lookup. Cache failures count as a miss.
    async fn fetch<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        match self.get::<T>(key).await {
            Ok(Some(value)) => {
                counter!("emporium_cache_requests_total", "result" => "hit").increment(1);
                Some(value)
            }
            Ok(None) => {
                counter!("emporium_cache_requests_total", "result" => "miss").increment(1);
                None
            }
            Err(e) => {
                warn!("Cache read for '{}' failed, treating as miss: {}", key, e);
                counter!("emporium_cache_requests_total", "result" => "miss").increment(1);
                None
            }
        }
    }

    /// Write-back after a miss. Failures are logged; the value is still returned
    /// to the caller.
    async fn store<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        if let Err(e) = self.set(key, value, ttl).await {
            warn!("Cache write for '{}' failed: {}", key, e);
        }
    }

    /// Evicts a key, logging failures.
    async fn evict(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            warn!("Cache eviction for '{}' failed: {}", key, e);
        }
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}

/// Cache used when caching is turned off: every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCache;

#[async_trait]
impl CacheInterface for DisabledCache {
    async fn get_raw(&self, _key: &str) -> EmporiumResult<Option<String>> {
        Ok(None)
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> EmporiumResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> EmporiumResult<bool> {
        Ok(false)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
