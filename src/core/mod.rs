// Core engine exports
pub mod aggregate;
pub mod catalog;
pub mod contact;
pub mod destination;
pub mod duration;
pub mod filters;
pub mod paginator;
pub mod price;
pub mod sorting;

pub use aggregate::{city_counts, duration_counts, hotel_rating_counts, price_range, FacetCount};
pub use catalog::{CatalogAction, CatalogState, CatalogView, FilterChange, DEFAULT_PAGE_SIZE};
pub use contact::{build_contact_message, whatsapp_url};
pub use destination::{CitySynonym, DestinationOverrides, DestinationProfile, DestinationRegistry, ZeroPricePolicy};
pub use duration::{extract_nights, leading_number, NO_DURATION};
pub use filters::{city_tokens, filter_packages, matches_selection, FilterSelection};
pub use paginator::{paginate, total_pages, Paginator};
pub use price::{format_inr, parse_price, parse_price_str};
pub use sorting::{sort_packages, SortKey};
