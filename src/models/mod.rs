// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Package, PriceValue, Itinerary, ItineraryDay, CityFilter, PriceRange};
pub use requests::{PackageQuery, DestinationQuery, ItineraryQuery, ContactRequest, PackagePayload, ItineraryPayload, split_list};
pub use responses::{PackageListResponse, CityFilterResponse, DataSource, DestinationSummary, ContactResponse, HealthResponse, ErrorResponse};
