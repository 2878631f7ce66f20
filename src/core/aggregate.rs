use crate::core::destination::DestinationProfile;
use crate::core::duration::{extract_nights, leading_number, NO_DURATION};
use crate::core::filters::city_tokens;
use crate::core::price::parse_price;
use crate::models::{CityFilter, Package, PriceRange};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Count of packages carrying a given facet value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount<T> {
    pub value: T,
    pub count: u32,
}

/// Packages per canonical city, alphabetical
///
/// A package listing the same city twice counts once.
pub fn city_counts(packages: &[Package], profile: &DestinationProfile) -> Vec<CityFilter> {
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();

    for package in packages {
        let cities: BTreeSet<&str> = city_tokens(&package.location, profile).into_iter().collect();
        for city in cities {
            *counts.entry(city.to_string()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, count)| CityFilter { name, count: Some(count) })
        .collect()
}

/// Packages per hotel star rating, highest first
pub fn hotel_rating_counts(packages: &[Package]) -> Vec<FacetCount<u8>> {
    let mut counts: BTreeMap<u8, u32> = BTreeMap::new();
    for package in packages {
        *counts.entry(package.hotel_rating).or_default() += 1;
    }

    counts
        .into_iter()
        .rev()
        .map(|(value, count)| FacetCount { value, count })
        .collect()
}

/// Packages per nights token, shortest stay first; "N/A" is left out
pub fn duration_counts(packages: &[Package]) -> Vec<FacetCount<String>> {
    let mut counts: BTreeMap<(u32, String), u32> = BTreeMap::new();
    for package in packages {
        let nights = extract_nights(&package.days);
        if nights == NO_DURATION {
            continue;
        }
        let order = leading_number(&nights).unwrap_or(u32::MAX);
        *counts.entry((order, nights)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((_, value), count)| FacetCount { value, count })
        .collect()
}

/// Observed price bounds, ignoring prices that did not parse
///
/// Falls back to the destination default when no package has a usable price.
pub fn price_range(packages: &[Package], profile: &DestinationProfile) -> PriceRange {
    let prices = packages
        .iter()
        .map(|p| parse_price(p.price.as_ref()))
        .filter(|price| *price > 0);

    let (min, max) = prices.fold((u64::MAX, 0), |(min, max), price| {
        (min.min(price), max.max(price))
    });

    if max == 0 {
        profile.default_price_range
    } else {
        PriceRange { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_package(id: &str, location: &str, price: &str, days: &str, rating: u8) -> Package {
        Package {
            location: location.to_string(),
            price: Some(price.into()),
            days: days.to_string(),
            hotel_rating: rating,
            ..Package::new(id, id)
        }
    }

    #[test]
    fn test_city_counts_dedupes_within_package() {
        let profile = DestinationProfile::new("dubai", "Dubai").with_synonym("Dubai City", "Dubai");
        let packages = vec![
            create_test_package("1", "Dubai & Dubai City", "", "", 3),
            create_test_package("2", "Dubai, Abu Dhabi", "", "", 3),
        ];

        let counts = city_counts(&packages, &profile);

        assert_eq!(
            counts,
            vec![
                CityFilter { name: "Abu Dhabi".to_string(), count: Some(1) },
                CityFilter { name: "Dubai".to_string(), count: Some(2) },
            ]
        );
    }

    #[test]
    fn test_duration_counts_ordered_by_nights() {
        let packages = vec![
            create_test_package("1", "", "", "10 Nights 11 Days", 3),
            create_test_package("2", "", "", "3 Nights 4 Days", 3),
            create_test_package("3", "", "", "3 Nights and 4 Days", 3),
            create_test_package("4", "", "", "Day trip", 3),
        ];

        let counts = duration_counts(&packages);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], FacetCount { value: "3 Nights".to_string(), count: 2 });
        assert_eq!(counts[1], FacetCount { value: "10 Nights".to_string(), count: 1 });
    }

    #[test]
    fn test_hotel_rating_counts() {
        let packages = vec![
            create_test_package("1", "", "", "", 3),
            create_test_package("2", "", "", "", 5),
            create_test_package("3", "", "", "", 5),
        ];

        let counts = hotel_rating_counts(&packages);

        assert_eq!(counts[0], FacetCount { value: 5, count: 2 });
        assert_eq!(counts[1], FacetCount { value: 3, count: 1 });
    }

    #[test]
    fn test_price_range_skips_zero() {
        let profile = DestinationProfile::new("x", "X").with_price_range(1, 2);
        let packages = vec![
            create_test_package("1", "", "₹45,000/-", "", 3),
            create_test_package("2", "", "On request", "", 3),
            create_test_package("3", "", "₹1,20,000/-", "", 3),
        ];

        assert_eq!(price_range(&packages, &profile), PriceRange { min: 45_000, max: 120_000 });
        assert_eq!(price_range(&packages[1..2], &profile), PriceRange { min: 1, max: 2 });
        assert_eq!(price_range(&[], &profile), PriceRange { min: 1, max: 2 });
    }
}
