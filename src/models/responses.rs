use serde::{Deserialize, Serialize};
use crate::core::CatalogView;
use crate::models::domain::{CityFilter, PriceRange};

/// Where the packages in a listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Cached,
    Fallback,
}

/// Response for the package listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageListResponse {
    pub destination: String,
    #[serde(flatten)]
    pub view: CatalogView,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Response for the city filter endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityFilterResponse {
    pub destination: String,
    pub cities: Vec<CityFilter>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Registered destination summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationSummary {
    pub slug: String,
    pub name: String,
    #[serde(rename = "defaultPriceRange")]
    pub default_price_range: PriceRange,
}

/// Response for the contact endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(rename = "whatsappUrl")]
    pub whatsapp_url: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
