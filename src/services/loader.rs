use crate::core::{city_counts, DestinationProfile};
use crate::models::{CityFilter, DataSource, Package};
use crate::services::cache::{CacheKey, CatalogCache};
use crate::services::generations::{FetchTicket, RequestGenerations};
use crate::services::store::{StoreClient, StoreError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of a list load, with where the data came from
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub items: Arc<Vec<T>>,
    pub source: DataSource,
    /// Set when the store failed and older or built-in data is being served
    pub error: Option<String>,
}

impl<T> Loaded<T> {
    fn live(items: Arc<Vec<T>>) -> Self {
        Self { items, source: DataSource::Live, error: None }
    }

    /// User-facing notice for degraded results
    pub fn notice(&self) -> Option<String> {
        match self.source {
            DataSource::Live => None,
            DataSource::Cached => {
                Some("Showing recently saved packages while we reconnect. Please retry shortly.".to_string())
            }
            DataSource::Fallback => {
                Some("Live packages are unavailable right now. Showing our standard offers; please retry.".to_string())
            }
        }
    }
}

/// Fetches catalog data with graceful degradation
///
/// Unreachable or failing store: last-known cached data, then the
/// destination's built-in fallback. Malformed payload: empty list.
/// Only the newest fetch per destination may refresh the cache.
pub struct CatalogLoader {
    store: Arc<StoreClient>,
    cache: Arc<CatalogCache>,
    generations: RequestGenerations,
    // Held across the latest-check and the cache write
    publish: Mutex<()>,
}

impl CatalogLoader {
    pub fn new(store: Arc<StoreClient>, cache: Arc<CatalogCache>) -> Self {
        Self {
            store,
            cache,
            generations: RequestGenerations::new(),
            publish: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<StoreClient> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<CatalogCache> {
        &self.cache
    }

    pub fn generations(&self) -> &RequestGenerations {
        &self.generations
    }

    /// Load the packages of a destination
    pub async fn load_packages(&self, profile: &DestinationProfile) -> Loaded<Package> {
        let ticket = self.generations.begin(&CacheKey::packages(&profile.slug));
        let result = self.store.fetch_packages(&profile.slug).await;

        self.settle_packages(profile, &ticket, result).await
    }

    /// Turn a finished package fetch into a listing, publishing it if `ticket`
    /// is still the newest for the destination
    pub async fn settle_packages(
        &self,
        profile: &DestinationProfile,
        ticket: &FetchTicket,
        result: Result<Vec<Package>, StoreError>,
    ) -> Loaded<Package> {
        match result {
            Ok(packages) => {
                let packages = Arc::new(packages);
                let guard = self.publish.lock().await;
                if self.generations.is_latest(ticket) {
                    self.cache.store_packages(&profile.slug, packages.clone()).await;
                } else {
                    tracing::debug!(
                        "Discarding stale package response for {} (generation {})",
                        profile.slug,
                        ticket.generation()
                    );
                }
                drop(guard);
                Loaded::live(packages)
            }
            Err(StoreError::InvalidResponse(e)) => {
                tracing::warn!("Malformed package payload for {}: {}", profile.slug, e);
                Loaded::live(Arc::new(vec![]))
            }
            Err(e) => {
                tracing::error!("Failed to fetch packages for {}: {}", profile.slug, e);
                if let Some(cached) = self.cache.packages(&profile.slug).await {
                    return Loaded { items: cached, source: DataSource::Cached, error: Some(e.to_string()) };
                }
                Loaded {
                    items: Arc::new(profile.fallback_packages.clone()),
                    source: DataSource::Fallback,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Load the city filter list of a destination
    ///
    /// The built-in fallback here is the city breakdown of the fallback packages.
    pub async fn load_city_filters(&self, profile: &DestinationProfile) -> Loaded<CityFilter> {
        match self.fetch_city_filters(profile).await {
            Ok(filters) => Loaded::live(filters),
            Err(StoreError::InvalidResponse(e)) => {
                tracing::warn!("Malformed city filter payload for {}: {}", profile.slug, e);
                Loaded::live(Arc::new(vec![]))
            }
            Err(e) => {
                tracing::error!("Failed to fetch city filters for {}: {}", profile.slug, e);
                if let Some(cached) = self.cache.city_filters(&profile.slug).await {
                    return Loaded { items: cached, source: DataSource::Cached, error: Some(e.to_string()) };
                }
                Loaded {
                    items: Arc::new(city_counts(&profile.fallback_packages, profile)),
                    source: DataSource::Fallback,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Fetch city filters and publish them to the cache if still the newest
    pub async fn fetch_city_filters(
        &self,
        profile: &DestinationProfile,
    ) -> Result<Arc<Vec<CityFilter>>, StoreError> {
        let ticket = self.generations.begin(&CacheKey::city_filters(&profile.slug));
        let result = self.store.fetch_city_filters(&profile.slug).await;

        self.settle_city_filters(profile, &ticket, result).await
    }

    /// Publish a finished city filter fetch if `ticket` is still the newest
    pub async fn settle_city_filters(
        &self,
        profile: &DestinationProfile,
        ticket: &FetchTicket,
        result: Result<Vec<CityFilter>, StoreError>,
    ) -> Result<Arc<Vec<CityFilter>>, StoreError> {
        let filters = Arc::new(result?);

        let _guard = self.publish.lock().await;
        if self.generations.is_latest(ticket) {
            self.cache.store_city_filters(&profile.slug, filters.clone()).await;
        } else {
            tracing::debug!("Discarding stale city filter response for {}", profile.slug);
        }

        Ok(filters)
    }

/// Forget last-known data after an admin change
    pub async fn invalidate(&self, destination: &str) {
        self.cache.invalidate(destination).await;
    }
}

/// Fill in counts the store left out using the package breakdown
pub fn fill_missing_counts(filters: &[CityFilter], counts: &[CityFilter]) -> Vec<CityFilter> {
    filters
        .iter()
        .map(|filter| CityFilter {
            name: filter.name.clone(),
            count: filter.count.or_else(|| {
                Some(
                    counts
                        .iter()
                        .find(|c| c.name == filter.name)
                        .and_then(|c| c.count)
                        .unwrap_or(0),
                )
            }),
        })
        .collect()
}
