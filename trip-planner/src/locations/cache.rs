//! Caching layer for reverse geocoding.
//!
//! Map taps near the same spot resolve to the same place, and geocoders are
//! slow and often rate limited. Results are cached by coordinate rounded to
//! a fixed number of decimals. Misses (`None`) are not cached so a transient
//! failure does not stick.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinate, Location};

use super::resolver::LocationResolver;

/// Cache key: latitude and longitude scaled by 10^precision and rounded.
type CoordinateKey = (i64, i64);

/// Configuration for the resolver cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Decimal places kept in the cache key (4 is roughly 11 m).
    pub precision: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
            precision: 4,
        }
    }
}

/// A `LocationResolver` that caches reverse-geocoding results.
///
/// `current_location` is never cached.
pub struct CachedLocationResolver<R> {
    inner: R,
    cache: MokaCache<CoordinateKey, Location>,
    scale: f64,
}

impl<R: LocationResolver> CachedLocationResolver<R> {
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            cache,
            scale: 10f64.powi(config.precision as i32),
        }
    }

    fn key(&self, coordinate: Coordinate) -> CoordinateKey {
        (
            (coordinate.latitude * self.scale).round() as i64,
            (coordinate.longitude * self.scale).round() as i64,
        )
    }

    /// Access the wrapped resolver.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<R: LocationResolver + Sync> LocationResolver for CachedLocationResolver<R> {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Option<Location> {
        let key = self.key(coordinate);

        if let Some(cached) = self.cache.get(&key).await {
            trace!(?key, "reverse geocode cache hit");
            return Some(cached);
        }

        let location = self.inner.reverse_geocode(coordinate).await?;
        self.cache.insert(key, location.clone()).await;
        Some(location)
    }

    async fn current_location(&self) -> Option<Location> {
        self.inner.current_location().await
    }
}
