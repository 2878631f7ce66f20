use crate::core::DestinationRegistry;
use crate::services::loader::CatalogLoader;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Periodically re-fetch city filters so admin edits show up without a restart
///
/// Best effort: failures are logged and the next tick tries again. The first
/// tick fires immediately, which warms the cache at startup.
pub fn spawn_city_filter_refresh(
    loader: Arc<CatalogLoader>,
    registry: Arc<DestinationRegistry>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            refresh_all(&loader, &registry).await;
        }
    })
}

/// Refresh every registered destination once, returning how many succeeded
pub async fn refresh_all(loader: &CatalogLoader, registry: &DestinationRegistry) -> usize {
    let mut refreshed = 0;

    for profile in registry.iter() {
        match loader.fetch_city_filters(profile).await {
            Ok(filters) => {
                refreshed += 1;
                tracing::debug!("Refreshed {} city filters for {}", filters.len(), profile.slug);
            }
            Err(e) => tracing::warn!("City filter refresh failed for {}: {}", profile.slug, e),
        }
    }

    tracing::info!("City filter refresh: {}/{} destinations", refreshed, registry.len());
    refreshed
}
