// Unit tests for Holiday Catalog

use holiday_catalog::core::{
    destination::{DestinationProfile, ZeroPricePolicy},
    duration::{extract_nights, leading_number, NO_DURATION},
    filters::{filter_packages, FilterSelection},
    price::{format_inr, parse_price, parse_price_str},
    sorting::{sort_packages, SortKey},
};
use holiday_catalog::models::{Package, PriceValue};

fn create_package(id: &str, location: &str, price: &str, days: &str, rating: u8) -> Package {
    Package {
        location: location.to_string(),
        price: Some(price.into()),
        days: days.to_string(),
        hotel_rating: rating,
        ..Package::new(id, format!("Package {}", id))
    }
}

fn create_catalog() -> Vec<Package> {
    vec![
        create_package("1", "Dubai", "₹45,000/-", "3 Nights 4 Days", 3),
        create_package("2", "Dubai & Abu Dhabi", "₹1,20,000/-", "6 Nights 7 Days", 5),
        create_package("3", "Abu Dhabi", "₹78,000/-", "4 Nights 5 Days", 4),
        create_package("4", "Dubai, Sharjah", "₹45,000/-", "4 Nights and 5 Days", 4),
        create_package("5", "Sharjah", "Price on request", "Flexible", 0),
    ]
}

#[test]
fn test_price_formatted_round_trip() {
    for amount in [0, 7, 999, 1_000, 45_000, 1_20_000, 12_34_567, 10_00_00_000] {
        assert_eq!(parse_price_str(&format_inr(amount)), amount);
    }
}

#[test]
fn test_price_missing_or_garbage_is_zero() {
    assert_eq!(parse_price(None), 0);
    assert_eq!(parse_price(Some(&PriceValue::from(""))), 0);
    assert_eq!(parse_price(Some(&PriceValue::from("abc"))), 0);
    assert_eq!(parse_price(Some(&PriceValue::Amount(-10.0))), 0);
}

#[test]
fn test_price_unit_prefixes() {
    assert_eq!(parse_price_str("INR 85,000"), 85_000);
    assert_eq!(parse_price_str("Rs. 85000/-"), 85_000);
    assert_eq!(parse_price_str("Rs 1,20,000"), 120_000);
    assert_eq!(parse_price(Some(&PriceValue::Amount(64_999.9))), 64_999);
}

#[test]
fn test_nights_extraction() {
    assert_eq!(extract_nights("5 Nights 6 Days"), "5 Nights");
    assert_eq!(extract_nights("5 Nights and 6 Days"), "5 Nights");
    assert_eq!(extract_nights("10Nights"), "10 Nights");
    assert_eq!(extract_nights("Weekend break"), NO_DURATION);
    assert_eq!(extract_nights(""), NO_DURATION);
}

#[test]
fn test_leading_number() {
    assert_eq!(leading_number("6 Nights 7 Days"), Some(6));
    assert_eq!(leading_number("Flexible"), None);
}

#[test]
fn test_filter_idempotent() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let packages = create_catalog();
    let selection = FilterSelection {
        cities: ["Dubai".to_string()].into_iter().collect(),
        hotel_ratings: [3, 4].into_iter().collect(),
        ..Default::default()
    };

    let once = filter_packages(&packages, &selection, &profile);
    let twice = filter_packages(&once, &selection, &profile);

    assert_eq!(once, twice);
    assert_eq!(once.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["1", "4"]);
}

#[test]
fn test_filter_monotonic() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let packages = create_catalog();

    let loose = FilterSelection {
        hotel_ratings: [4, 5].into_iter().collect(),
        ..Default::default()
    };
    let mut strict = loose.clone();
    strict.price_max = Some(80_000);

    let loose_result = filter_packages(&packages, &loose, &profile);
    let strict_result = filter_packages(&packages, &strict, &profile);

    assert!(strict_result.len() <= loose_result.len());
    assert!(strict_result.iter().all(|p| loose_result.contains(p)));
}

#[test]
fn test_empty_selection_keeps_everything() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let packages = create_catalog();

    assert_eq!(filter_packages(&packages, &FilterSelection::default(), &profile), packages);
}

#[test]
fn test_zero_price_policy() {
    let mut profile = DestinationProfile::new("dubai", "Dubai");
    let packages = create_catalog();
    let selection = FilterSelection {
        price_max: Some(50_000),
        ..Default::default()
    };

    let included = filter_packages(&packages, &selection, &profile);
    assert!(included.iter().any(|p| p.id == "5"));

    profile.zero_price_policy = ZeroPricePolicy::Exclude;
    let excluded = filter_packages(&packages, &selection, &profile);
    assert!(excluded.iter().all(|p| p.id != "5"));
    assert_eq!(excluded.len(), 2);
}

#[test]
fn test_sort_price_low_stable() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let sorted = sort_packages(&create_catalog(), SortKey::PriceLow, &profile);
    let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();

    // "5" parses to 0; "1" and "4" tie and keep their input order
    assert_eq!(ids, vec!["5", "1", "4", "3", "2"]);
}

#[test]
fn test_sort_duration_missing_last() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let sorted = sort_packages(&create_catalog(), SortKey::Duration, &profile);
    let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(ids, vec!["1", "3", "4", "2", "5"]);
}

#[test]
fn test_sort_is_permutation() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let packages = create_catalog();

    for key in [SortKey::PriceLow, SortKey::PriceHigh, SortKey::Duration, SortKey::Rating, SortKey::Popularity] {
        let mut sorted_ids: Vec<_> = sort_packages(&packages, key, &profile)
            .into_iter()
            .map(|p| p.id)
            .collect();
        sorted_ids.sort();
        assert_eq!(sorted_ids, vec!["1", "2", "3", "4", "5"]);
    }
}

#[test]
fn test_unknown_sort_key_keeps_order() {
    let profile = DestinationProfile::new("dubai", "Dubai");
    let packages = create_catalog();

    assert_eq!(SortKey::parse("cheapest"), SortKey::Unsorted);
    assert_eq!(sort_packages(&packages, SortKey::parse("cheapest"), &profile), packages);
}
