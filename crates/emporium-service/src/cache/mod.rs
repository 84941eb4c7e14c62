//! Caching infrastructure for the service layer.
//!
//! Listing pages are cached under keys derived from the normalized query and
//! are never invalidated by writes: a change becomes visible to an identical
//! listing once its TTL expires. Entities cached by id are evicted on update
//! and delete.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface, DisabledCache};
pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCacheService;

use emporium_config::{CacheBackend, CacheConfig};
use emporium_core::EmporiumResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// TTLs applied by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// Product and review listing pages.
    pub listing: Duration,
    /// Entities cached by id.
    pub entity: Duration,
}

impl From<&CacheConfig> for CacheTtl {
    fn from(config: &CacheConfig) -> Self {
        Self {
            listing: config.listing_ttl(),
            entity: config.entity_ttl(),
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

/// Builds the configured cache backend.
pub fn create_cache(config: &CacheConfig) -> EmporiumResult<Arc<dyn CacheInterface>> {
    let cache: Arc<dyn CacheInterface> = match config.backend {
        CacheBackend::Redis => Arc::new(RedisCacheService::connect(config)?),
        CacheBackend::Memory => Arc::new(MemoryCache::new(config.max_entries)),
        CacheBackend::Disabled => Arc::new(DisabledCache),
    };
    info!("Cache backend: {:?}", config.backend);
    Ok(cache)
}
