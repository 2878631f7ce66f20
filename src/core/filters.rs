use crate::core::destination::{DestinationProfile, ZeroPricePolicy};
use crate::core::duration::extract_nights;
use crate::core::price::parse_price;
use crate::models::Package;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active user-chosen constraints on the package list
///
/// Empty sets do not constrain; non-empty sets match any member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub cities: BTreeSet<String>,
    #[serde(rename = "hotelRatings")]
    pub hotel_ratings: BTreeSet<u8>,
    pub durations: BTreeSet<String>,
    #[serde(rename = "priceMax")]
    pub price_max: Option<u64>,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
            && self.hotel_ratings.is_empty()
            && self.durations.is_empty()
            && self.price_max.is_none()
    }
}

/// Split a location into canonical city names
///
/// "Dubai City & Abu Dhabi, Sharjah" gives ["Dubai", "Abu Dhabi", "Sharjah"]
/// when the profile maps "Dubai City" to "Dubai".
pub fn city_tokens<'a>(location: &'a str, profile: &'a DestinationProfile) -> Vec<&'a str> {
    location
        .split(['&', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| profile.canonical_city(token))
        .collect()
}

#[inline]
pub fn matches_cities(
    package: &Package,
    cities: &BTreeSet<String>,
    profile: &DestinationProfile,
) -> bool {
    if cities.is_empty() {
        return true;
    }

    let wanted: BTreeSet<&str> = cities.iter().map(|c| profile.canonical_city(c)).collect();

    city_tokens(&package.location, profile)
        .into_iter()
        .any(|city| wanted.contains(city))
}

#[inline]
pub fn matches_hotel_rating(package: &Package, ratings: &BTreeSet<u8>) -> bool {
    ratings.is_empty() || ratings.contains(&package.hotel_rating)
}

#[inline]
pub fn matches_duration(package: &Package, durations: &BTreeSet<String>) -> bool {
    durations.is_empty() || durations.contains(&extract_nights(&package.days))
}

#[inline]
pub fn matches_price(package: &Package, price_max: Option<u64>, policy: ZeroPricePolicy) -> bool {
    let Some(ceiling) = price_max else {
        return true;
    };

    let price = parse_price(package.price.as_ref());
    if price == 0 && policy == ZeroPricePolicy::Exclude {
        return false;
    }

    price <= ceiling
}

/// Check a package against every category of the selection
#[inline]
pub fn matches_selection(
    package: &Package,
    selection: &FilterSelection,
    profile: &DestinationProfile,
) -> bool {
    matches_hotel_rating(package, &selection.hotel_ratings)
        && matches_price(package, selection.price_max, profile.zero_price_policy)
        && matches_duration(package, &selection.durations)
        && matches_cities(package, &selection.cities, profile)
}

/// Packages satisfying the selection, in their original order
pub fn filter_packages(
    packages: &[Package],
    selection: &FilterSelection,
    profile: &DestinationProfile,
) -> Vec<Package> {
    packages
        .iter()
        .filter(|package| matches_selection(package, selection, profile))
        .cloned()
        .collect()
}
