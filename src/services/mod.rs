// Service exports
pub mod cache;
pub mod generations;
pub mod loader;
pub mod refresh;
pub mod store;

pub use cache::{CatalogCache, CacheKey};
pub use generations::{FetchTicket, RequestGenerations};
pub use loader::{CatalogLoader, Loaded, fill_missing_counts};
pub use refresh::{spawn_city_filter_refresh, refresh_all};
pub use store::{StoreClient, StoreError, Collection};
