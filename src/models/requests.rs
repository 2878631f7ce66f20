use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the package listing endpoint
///
/// List values (`cities`, `ratings`, `durations`) are comma separated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageQuery {
    pub destination: String,
    #[serde(default)]
    pub cities: Option<String>,
    #[serde(default)]
    pub ratings: Option<String>,
    #[serde(default)]
    pub durations: Option<String>,
    #[serde(default, rename = "priceMax", alias = "price_max")]
    pub price_max: Option<u64>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default, rename = "pageSize", alias = "page_size")]
    pub page_size: Option<usize>,
}

/// Split a comma separated query value, dropping blanks
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationQuery {
    pub destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryQuery {
    #[serde(rename = "packageId", alias = "package_id")]
    pub package_id: String,
}

/// Contact form submission, turned into a WhatsApp message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 6, max = 20))]
    pub phone: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, rename = "travelDate", alias = "travel_date")]
    pub travel_date: Option<String>,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub travellers: Option<u32>,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub message: Option<String>,
}

/// Fields an admin package write must carry; the rest passes through untouched
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PackagePayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub price: Option<crate::models::PriceValue>,
    #[validate(range(max = 5))]
    #[serde(default, rename = "hotelRating")]
    pub hotel_rating: Option<u8>,
    #[serde(default)]
    pub destination: Option<String>,
}

/// Fields an admin itinerary write must carry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItineraryPayload {
    #[validate(length(min = 1))]
    #[serde(rename = "packageId", alias = "package_id")]
    pub package_id: String,
    #[serde(default)]
    pub title: String,
}
