// Integration tests for Holiday Catalog

use holiday_catalog::core::{
    paginate, total_pages, CatalogAction, CatalogState, DestinationRegistry, FilterChange,
    FilterSelection, Paginator, SortKey,
};
use holiday_catalog::models::Package;
use std::sync::Arc;

fn create_test_package(id: &str, location: &str, price: &str, days: &str, rating: u8) -> Package {
    Package {
        location: location.to_string(),
        price: Some(price.into()),
        days: days.to_string(),
        hotel_rating: rating,
        ..Package::new(id, format!("Package {}", id))
    }
}

fn create_state(packages: Vec<Package>, page_size: usize) -> CatalogState {
    let registry = DestinationRegistry::with_builtin();
    let profile = registry.get("dubai").cloned().expect("dubai is built in");
    CatalogState::new(profile, page_size).with_packages(packages)
}

fn create_bulk(count: usize) -> Vec<Package> {
    (0..count)
        .map(|i| {
            create_test_package(
                &i.to_string(),
                if i % 2 == 0 { "Dubai" } else { "Abu Dhabi" },
                &format!("₹{},000/-", 30 + i),
                &format!("{} Nights {} Days", 3 + i % 4, 4 + i % 4),
                3 + (i % 3) as u8,
            )
        })
        .collect()
}

#[test]
fn test_end_to_end_rating_and_price_sort() {
    let packages = vec![
        create_test_package("1", "Dubai", "₹45,000/-", "3 Nights 4 Days", 3),
        create_test_package("2", "Dubai", "₹1,20,000/-", "6 Nights 7 Days", 5),
    ];
    let mut state = create_state(packages, 6);

    state.dispatch(CatalogAction::SetFilter(FilterChange::ToggleHotelRating(5)));
    state.dispatch(CatalogAction::SetSort(SortKey::PriceLow));

    let view = state.view();
    assert_eq!(view.packages.len(), 1);
    assert_eq!(view.packages[0].id, "2");
    assert_eq!(view.total_results, 1);
    assert_eq!(view.total_pages, 1);
}

#[test]
fn test_end_to_end_price_below_cheapest() {
    let packages = vec![
        create_test_package("1", "Dubai", "₹45,000/-", "3 Nights 4 Days", 3),
        create_test_package("2", "Dubai", "₹1,20,000/-", "6 Nights 7 Days", 5),
    ];
    let mut state = create_state(packages, 6);

    state.dispatch(CatalogAction::SetFilter(FilterChange::SetPriceMax(Some(44_999))));

    let view = state.view();
    assert!(view.packages.is_empty());
    assert_eq!(view.total_results, 0);
    assert_eq!(view.total_pages, 0);
    assert_eq!(view.page, 0);
}

#[test]
fn test_pages_cover_list_exactly_once() {
    let items: Vec<usize> = (0..23).collect();

    for page_size in [1, 4, 6, 23, 50] {
        let pages = total_pages(items.len(), page_size);
        let mut seen = Vec::new();
        for index in 0..pages {
            let page = paginate(&items, page_size, index);
            assert!(!page.is_empty());
            assert!(page.len() <= page_size);
            seen.extend_from_slice(page);
        }
        assert_eq!(seen, items);
        assert!(paginate(&items, page_size, pages).is_empty());
    }
}

#[test]
fn test_next_page_cycles_back() {
    let mut paginator = Paginator::new(4);
    paginator.resize(10);
    paginator.set_page(1);
    let start = paginator.index();

    for _ in 0..paginator.total_pages() {
        paginator.next_page();
    }

    assert_eq!(paginator.total_pages(), 3);
    assert_eq!(paginator.index(), start);
}

#[test]
fn test_prev_page_wraps_to_last() {
    let mut state = create_state(create_bulk(14), 6);

    state.dispatch(CatalogAction::PrevPage);

    assert_eq!(state.page(), 2);
    assert_eq!(state.current_page().len(), 2);
}

#[test]
fn test_set_page_clamps_to_last() {
    let mut state = create_state(create_bulk(14), 6);

    state.dispatch(CatalogAction::SetPage(99));

    assert_eq!(state.page(), 2);
}

#[test]
fn test_navigation_without_results_is_noop() {
    let mut state = create_state(vec![], 6);

    state.dispatch(CatalogAction::NextPage);
    state.dispatch(CatalogAction::PrevPage);

    assert_eq!(state.page(), 0);
    assert_eq!(state.total_pages(), 0);
    assert!(state.current_page().is_empty());
}

#[test]
fn test_filter_change_resets_page_but_sort_does_not() {
    let mut state = create_state(create_bulk(20), 6);

    state.dispatch(CatalogAction::SetPage(2));
    state.dispatch(CatalogAction::SetSort(SortKey::PriceHigh));
    assert_eq!(state.page(), 2);

    state.dispatch(CatalogAction::SetFilter(FilterChange::ToggleCity("Dubai".to_string())));
    assert_eq!(state.page(), 0);
    assert_eq!(state.visible().len(), 10);
}

#[test]
fn test_synonym_cities_match() {
    let packages = vec![
        create_test_package("1", "Dubai City & Abu Dhabi", "₹60,000/-", "4 Nights 5 Days", 4),
        create_test_package("2", "Abu Dhabi City", "₹50,000/-", "3 Nights 4 Days", 3),
        create_test_package("3", "Sharjah", "₹40,000/-", "3 Nights 4 Days", 3),
    ];
    let mut state = create_state(packages, 6);

    state.dispatch(CatalogAction::SetFilter(FilterChange::ToggleCity("Abu Dhabi".to_string())));

    let ids: Vec<_> = state.visible().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    let view = state.view();
    let names: Vec<_> = view.cities.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Abu Dhabi", "Dubai", "Sharjah"]);
    assert_eq!(view.cities[0].count, Some(2));
}

#[test]
fn test_clear_all_restores_defaults() {
    let mut state = create_state(create_bulk(20), 6);

    state.dispatch(CatalogAction::SetFilter(FilterChange::Replace(FilterSelection {
        hotel_ratings: [5].into_iter().collect(),
        price_max: Some(40_000),
        ..Default::default()
    })));
    state.dispatch(CatalogAction::SetSort(SortKey::Rating));
    assert!(state.visible().len() < 20);

    state.dispatch(CatalogAction::ClearAll);

    assert!(state.selection().is_empty());
    assert_eq!(state.sort_key(), SortKey::Unsorted);
    assert_eq!(state.page(), 0);
    assert_eq!(state.visible().len(), 20);
    assert_eq!(state.visible()[0].id, "0");
}

#[test]
fn test_view_facets_describe_full_list() {
    let mut state = create_state(create_bulk(12), 6);
    state.dispatch(CatalogAction::SetFilter(FilterChange::ToggleHotelRating(5)));

    let view = state.view();

    assert_eq!(view.total_results, 4);
    let total_rated: u32 = view.hotel_ratings.iter().map(|f| f.count).sum();
    assert_eq!(total_rated, 12);
    assert_eq!(view.hotel_ratings[0].value, 5);
    assert_eq!(view.durations[0].value, "3 Nights");
    assert_eq!(view.price_range.min, 30_000);
    assert_eq!(view.price_range.max, 41_000);
}

#[test]
fn test_packages_replaced_keeps_selection() {
    let mut state = create_state(create_bulk(6), 6);
    state.dispatch(CatalogAction::SetFilter(FilterChange::ToggleCity("Abu Dhabi".to_string())));
    assert_eq!(state.visible().len(), 3);

    state.dispatch(CatalogAction::SetPackages(create_bulk(10)));

    assert_eq!(state.visible().len(), 5);
    assert!(state.selection().cities.contains("Abu Dhabi"));
}

#[test]
fn test_view_serializes_camel_case() {
    let state = create_state(create_bulk(3), 6);
    let json = serde_json::to_value(state.view()).unwrap();

    assert_eq!(json["totalResults"], 3);
    assert_eq!(json["totalPages"], 1);
    assert_eq!(json["sort"], "unsorted");
    assert!(json["priceRange"]["min"].is_number());
}

#[test]
fn test_shared_profile_across_states() {
    let registry = DestinationRegistry::with_builtin();
    let profile = Arc::clone(registry.get("Dubai").expect("lookup ignores case"));

    let first = CatalogState::new(profile.clone(), 6).with_packages(create_bulk(4));
    let second = CatalogState::new(profile, 2).with_packages(create_bulk(4));

    assert_eq!(first.total_pages(), 1);
    assert_eq!(second.total_pages(), 2);
}
