use crate::models::{CityFilter, Package};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Last-known catalog data, keyed by destination
///
/// Only ever read when the store cannot be reached; live responses always
/// win when they arrive.
pub struct CatalogCache {
    packages: Cache<String, Arc<Vec<Package>>>,
    city_filters: Cache<String, Arc<Vec<CityFilter>>>,
}

impl CatalogCache {
    /// Create a new cache holding up to `capacity` lists per kind
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        Self {
            packages: build_cache(capacity, ttl_secs),
            city_filters: build_cache(capacity, ttl_secs),
        }
    }

    pub async fn packages(&self, destination: &str) -> Option<Arc<Vec<Package>>> {
        let hit = self.packages.get(&CacheKey::packages(destination)).await;
        tracing::trace!("Package cache {} for {}", if hit.is_some() { "hit" } else { "miss" }, destination);
        hit
    }

    pub async fn store_packages(&self, destination: &str, packages: Arc<Vec<Package>>) {
        self.packages.insert(CacheKey::packages(destination), packages).await;
        tracing::trace!("Package cache set: {}", destination);
    }

    pub async fn city_filters(&self, destination: &str) -> Option<Arc<Vec<CityFilter>>> {
        self.city_filters.get(&CacheKey::city_filters(destination)).await
    }

    pub async fn store_city_filters(&self, destination: &str, filters: Arc<Vec<CityFilter>>) {
        self.city_filters.insert(CacheKey::city_filters(destination), filters).await;
        tracing::trace!("City filter cache set: {}", destination);
    }

    /// Drop everything cached for a destination
    pub async fn invalidate(&self, destination: &str) {
        self.packages.invalidate(&CacheKey::packages(destination)).await;
        self.city_filters.invalidate(&CacheKey::city_filters(destination)).await;
        tracing::debug!("Invalidated cached catalog for {}", destination);
    }

    /// Drop everything
    pub fn invalidate_all(&self) {
        self.packages.invalidate_all();
        self.city_filters.invalidate_all();
    }
}

fn build_cache<V>(capacity: u64, ttl_secs: u64) -> Cache<String, V>
where
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(capacity)
        .time_to_live(Duration::from_secs(ttl_secs))
        .build()
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a destination's package list
    pub fn packages(destination: &str) -> String {
        format!("packages:{}", destination.to_lowercase())
    }

    /// Build a cache key for a destination's city filters
    pub fn city_filters(destination: &str) -> String {
        format!("city-filters:{}", destination.to_lowercase())
    }
}
