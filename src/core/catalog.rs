use crate::core::aggregate::{city_counts, duration_counts, hotel_rating_counts, price_range, FacetCount};
use crate::core::destination::DestinationProfile;
use crate::core::filters::{filter_packages, FilterSelection};
use crate::core::paginator::Paginator;
use crate::core::sorting::{sort_packages, SortKey};
use crate::models::{CityFilter, Package, PriceRange};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Listing page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Change to a single filter category
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    ToggleCity(String),
    ToggleHotelRating(u8),
    ToggleDuration(String),
    SetPriceMax(Option<u64>),
    Replace(FilterSelection),
}

/// Every state transition of a listing page
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    SetPackages(Vec<Package>),
    SetFilter(FilterChange),
    SetSort(SortKey),
    SetPage(usize),
    NextPage,
    PrevPage,
    ClearAll,
}

/// Rendered state of a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub packages: Vec<Package>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
    pub page: usize,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    pub sort: SortKey,
    pub selection: FilterSelection,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    pub cities: Vec<CityFilter>,
    #[serde(rename = "hotelRatings")]
    pub hotel_ratings: Vec<FacetCount<u8>>,
    pub durations: Vec<FacetCount<String>>,
}

/// State container for one destination listing
///
/// All transitions go through [`CatalogState::dispatch`]. The filtered and
/// sorted list is recomputed after each action so the paginator always
/// knows the current page count.
#[derive(Debug, Clone)]
pub struct CatalogState {
    profile: Arc<DestinationProfile>,
    packages: Vec<Package>,
    selection: FilterSelection,
    sort: SortKey,
    paginator: Paginator,
    visible: Vec<Package>,
}

impl CatalogState {
    pub fn new(profile: Arc<DestinationProfile>, page_size: usize) -> Self {
        Self {
            profile,
            packages: vec![],
            selection: FilterSelection::default(),
            sort: SortKey::default(),
            paginator: Paginator::new(page_size),
            visible: vec![],
        }
    }

    pub fn with_packages(mut self, packages: Vec<Package>) -> Self {
        self.dispatch(CatalogAction::SetPackages(packages));
        self
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.paginator.index()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    /// Filtered and sorted packages across all pages
    pub fn visible(&self) -> &[Package] {
        &self.visible
    }

    /// Packages on the current page
    pub fn current_page(&self) -> &[Package] {
        self.paginator.page(&self.visible)
    }

    pub fn dispatch(&mut self, action: CatalogAction) {
        tracing::trace!("Catalog {} action: {:?}", self.profile.slug, action);

        match action {
            CatalogAction::SetPackages(packages) => {
                self.packages = packages;
                self.refresh();
            }
            CatalogAction::SetFilter(change) => {
                self.apply_filter(change);
                self.paginator.reset();
                self.refresh();
            }
            CatalogAction::SetSort(key) => {
                self.sort = key;
                self.refresh();
            }
            CatalogAction::SetPage(index) => self.paginator.set_page(index),
            CatalogAction::NextPage => self.paginator.next_page(),
            CatalogAction::PrevPage => self.paginator.prev_page(),
            CatalogAction::ClearAll => {
                self.selection = FilterSelection::default();
                self.sort = SortKey::default();
                self.paginator.reset();
                self.refresh();
            }
        }
    }

    fn apply_filter(&mut self, change: FilterChange) {
        match change {
            FilterChange::ToggleCity(city) => toggle(&mut self.selection.cities, city),
            FilterChange::ToggleHotelRating(rating) => {
                toggle(&mut self.selection.hotel_ratings, rating)
            }
            FilterChange::ToggleDuration(duration) => {
                toggle(&mut self.selection.durations, duration)
            }
            FilterChange::SetPriceMax(price_max) => self.selection.price_max = price_max,
            FilterChange::Replace(selection) => self.selection = selection,
        }
    }

    fn refresh(&mut self) {
        let filtered = filter_packages(&self.packages, &self.selection, &self.profile);
        self.visible = sort_packages(&filtered, self.sort, &self.profile);
        self.paginator.resize(self.visible.len());
    }

    /// Snapshot for rendering; facet counts describe the full unfiltered list
    pub fn view(&self) -> CatalogView {
        CatalogView {
            packages: self.current_page().to_vec(),
            total_results: self.visible.len(),
            total_pages: self.paginator.total_pages(),
            page: self.paginator.index(),
            page_size: self.paginator.page_size(),
            sort: self.sort,
            selection: self.selection.clone(),
            price_range: price_range(&self.packages, &self.profile),
            cities: city_counts(&self.packages, &self.profile),
            hotel_ratings: hotel_rating_counts(&self.packages),
            durations: duration_counts(&self.packages),
        }
    }
}

fn toggle<T: Ord>(set: &mut std::collections::BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}
