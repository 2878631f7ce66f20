use crate::core::destination::DestinationProfile;
use crate::core::duration::leading_number;
use crate::core::price::parse_price;
use crate::models::Package;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Ordering selectable from the listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    Duration,
    Rating,
    Popularity,
    /// Keep the store order
    #[default]
    Unsorted,
}

impl SortKey {
    /// Unknown keys leave the order untouched
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "duration" => SortKey::Duration,
            "rating" => SortKey::Rating,
            "popularity" => SortKey::Popularity,
            _ => SortKey::Unsorted,
        }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Return a new list ordered by `key`
///
/// Uses a stable sort, so packages with equal keys keep their relative order.
pub fn sort_packages(
    packages: &[Package],
    key: SortKey,
    profile: &DestinationProfile,
) -> Vec<Package> {
    let mut sorted = packages.to_vec();

    match key {
        SortKey::PriceLow => sorted.sort_by_key(|p| parse_price(p.price.as_ref())),
        SortKey::PriceHigh => sorted.sort_by_key(|p| Reverse(parse_price(p.price.as_ref()))),
        // Packages without a number in `days` go last
        SortKey::Duration => sorted.sort_by_key(|p| leading_number(&p.days).unwrap_or(u32::MAX)),
        SortKey::Rating => sorted.sort_by_key(|p| Reverse(p.hotel_rating)),
        SortKey::Popularity => {
            sorted.sort_by_key(|p| profile.popularity_rank(p.package_type.as_deref()))
        }
        SortKey::Unsorted => {}
    }

    sorted
}
