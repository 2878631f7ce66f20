use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw price as stored: either a formatted string ("₹85,000/-") or a number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Amount(f64),
    Text(String),
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

impl From<u64> for PriceValue {
    fn from(value: u64) -> Self {
        PriceValue::Amount(value as f64)
    }
}

/// Holiday package as served by the package store
///
/// Apart from `id`, a field that is null or of the wrong type degrades to its
/// default instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(alias = "_id", alias = "$id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<PriceValue>,
    #[serde(default, alias = "duration", deserialize_with = "lenient_text")]
    pub days: String,
    #[serde(
        rename = "hotelRating",
        alias = "hotel_rating",
        default,
        deserialize_with = "lenient_rating"
    )]
    pub hotel_rating: u8,
    #[serde(rename = "type", alias = "category", default, deserialize_with = "lenient_opt_text")]
    pub package_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_text")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_text")]
    pub destination: Option<String>,
}

impl Package {
    /// Minimal package, mostly useful for fallbacks and tests
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: String::new(),
            price: None,
            days: String::new(),
            hotel_rating: 0,
            package_type: None,
            features: vec![],
            highlights: vec![],
            image: None,
            destination: None,
        }
    }
}

/// Accepts `5`, `4.0`, `"5"` or garbage (which becomes 0)
fn lenient_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rating = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };

    Ok(rating.clamp(0.0, u8::MAX as f64) as u8)
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Strings as-is, numbers as their text, anything else empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// String items of an array; null or a non-array reads as empty
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => vec![],
    };

    Ok(items)
}

/// Numbers and strings only; `true`, objects and the like read as no price
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<PriceValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().map(PriceValue::Amount),
        Value::String(s) => Some(PriceValue::Text(s)),
        _ => None,
    };

    Ok(price)
}

/// A single day of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    #[serde(default)]
    pub day: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub activities: Vec<String>,
}

/// Day-by-day plan attached to a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(alias = "_id", alias = "$id", default)]
    pub id: String,
    #[serde(rename = "packageId", alias = "package_id")]
    pub package_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub inclusions: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub exclusions: Vec<String>,
}

/// City entry for the filter sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityFilter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Inclusive price bounds in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_lenient_fields() {
        let json = r#"{
            "_id": "pkg-1",
            "title": "Dubai Delight",
            "price": "₹45,000/-",
            "duration": "3 Nights 4 Days",
            "hotelRating": "4",
            "category": "Family"
        }"#;

        let package: Package = serde_json::from_str(json).unwrap();

        assert_eq!(package.id, "pkg-1");
        assert_eq!(package.days, "3 Nights 4 Days");
        assert_eq!(package.hotel_rating, 4);
        assert_eq!(package.package_type.as_deref(), Some("Family"));
        assert_eq!(package.price, Some(PriceValue::Text("₹45,000/-".to_string())));
        assert!(package.features.is_empty());
    }

    #[test]
    fn test_package_bad_rating_degrades() {
        let json = r#"{"id": "x", "hotelRating": "five", "price": 12000}"#;
        let package: Package = serde_json::from_str(json).unwrap();

        assert_eq!(package.hotel_rating, 0);
        assert_eq!(package.price, Some(PriceValue::Amount(12000.0)));
    }

    #[test]
    fn test_package_wrong_typed_fields_degrade() {
        let json = r#"{
            "id": "pkg-2",
            "title": null,
            "location": null,
            "days": 6,
            "price": true,
            "type": 3,
            "features": null,
            "highlights": ["Burj Khalifa", 42, null],
            "image": {"url": "x.jpg"}
        }"#;

        let package: Package = serde_json::from_str(json).unwrap();

        assert_eq!(package.id, "pkg-2");
        assert_eq!(package.title, "");
        assert_eq!(package.location, "");
        assert_eq!(package.days, "6");
        assert_eq!(package.price, None);
        assert_eq!(package.package_type.as_deref(), Some("3"));
        assert!(package.features.is_empty());
        assert_eq!(package.highlights, vec!["Burj Khalifa"]);
        assert_eq!(package.image, None);
    }

    #[test]
    fn test_package_still_needs_id() {
        assert!(serde_json::from_str::<Package>(r#"{"title": "No id"}"#).is_err());
    }

    #[test]
    fn test_itinerary_null_lists() {
        let json = r#"{"packageId": "p1", "inclusions": null, "days": [{"day": 1, "activities": null}]}"#;
        let itinerary: Itinerary = serde_json::from_str(json).unwrap();

        assert!(itinerary.inclusions.is_empty());
        assert!(itinerary.days[0].activities.is_empty());
    }

    #[test]
    fn test_city_filter_without_count() {
        let filter: CityFilter = serde_json::from_str(r#"{"name": "Dubai"}"#).unwrap();
        assert_eq!(filter.count, None);
    }
}
