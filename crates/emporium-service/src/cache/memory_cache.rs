//! In-process cache with per-entry expiry, backed by moka.

use super::CacheInterface;
use async_trait::async_trait;
use emporium_core::EmporiumResult;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct Entry {
    json: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Bounded map of JSON values with TTLs, for single-instance deployments.
pub struct MemoryCache {
    cache: Cache<String, Entry>,
    max_entries: u64,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` keys.
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let max_entries = u64::try_from(max_entries.max(1)).unwrap_or(u64::MAX);
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryTtl)
            .build();
        Self { cache, max_entries }
    }

    /// Number of live entries after pending maintenance has run.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheInterface for MemoryCache {
    async fn get_raw(&self, key: &str) -> EmporiumResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.json))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> EmporiumResult<()> {
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    json: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> EmporiumResult<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .field("max_entries", &self.max_entries)
            .finish()
    }
}
