//! Caching layer for leg catalog lookups.
//!
//! Breadth-first search asks for the same station's departures many times
//! within one request, and consecutive requests share most of the graph.
//! `CachedCatalog` keeps recent lookups in a bounded TTL cache so repeated
//! lookups don't reach the backing schedule source.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache as MokaCache;
use tracing::trace;

use crate::catalog::{CatalogError, LegCatalog};
use crate::domain::{Leg, StationCode};

/// Cached departures for one station.
type DeparturesEntry = Arc<Vec<Arc<Leg>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached stations.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Leg catalog with caching.
///
/// Wraps any `LegCatalog` and caches successful lookups by station.
/// Failed lookups are not cached.
pub struct CachedCatalog<C> {
    inner: C,
    departures: MokaCache<StationCode, DeparturesEntry>,
}

impl<C: LegCatalog> CachedCatalog<C> {
    /// Create a new cached catalog.
    pub fn new(inner: C, config: &CacheConfig) -> Self {
        let departures = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, departures }
    }

    /// Access the underlying catalog for lookups that bypass the cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.departures.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.departures.invalidate_all();
    }
}

impl<C: LegCatalog> LegCatalog for CachedCatalog<C> {
    fn legs_from(&self, station: &StationCode) -> Result<Vec<Arc<Leg>>, CatalogError> {
        if let Some(cached) = self.departures.get(station) {
            trace!(station = %station, "Catalog cache hit");
            return Ok(cached.as_ref().clone());
        }

        let legs = self.inner.legs_from(station)?;
        self.departures
            .insert(station.clone(), Arc::new(legs.clone()));

        Ok(legs)
    }
}
