//! Holiday Catalog - package listing service for the holiday booking site
//!
//! This library provides the package filter/sort/paginate engine shared by
//! every destination page, the client for the package store, and the HTTP
//! routes serving the catalog.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    extract_nights, filter_packages, paginate, parse_price, sort_packages, CatalogAction,
    CatalogState, DestinationProfile, DestinationRegistry, FilterSelection, SortKey,
};
pub use models::{Package, PriceValue, Itinerary, CityFilter, PackageListResponse};
