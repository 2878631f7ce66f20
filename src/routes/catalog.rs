use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse, Responder};
use crate::core::{
    city_counts, extract_nights, CatalogAction, CatalogState, FilterChange, FilterSelection, SortKey,
    NO_DURATION,
};
use crate::models::{
    split_list, CityFilterResponse, DestinationQuery, DestinationSummary, HealthResponse,
    PackageListResponse, PackageQuery,
};
use crate::routes::{unknown_destination, AppState};
use crate::services::fill_missing_counts;

/// Configure catalog browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/destinations", web::get().to(list_destinations))
        .route("/packages", web::get().to(list_packages))
        .route("/city-filters", web::get().to(list_city_filters));
}

fn no_store() -> CacheControl {
    CacheControl(vec![CacheDirective::NoStore])
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/destinations
async fn list_destinations(state: web::Data<AppState>) -> impl Responder {
    let destinations: Vec<DestinationSummary> = state
        .registry
        .iter()
        .map(|profile| DestinationSummary {
            slug: profile.slug.clone(),
            name: profile.name.clone(),
            default_price_range: profile.default_price_range,
        })
        .collect();

    HttpResponse::Ok().json(destinations)
}

/// Accept "5 Nights 6 Days", "5 Nights" or just "5"
fn normalize_duration(value: &str) -> String {
    let nights = extract_nights(value);
    if nights != NO_DURATION {
        return nights;
    }
    match value.trim().parse::<u32>() {
        Ok(n) => format!("{} Nights", n),
        Err(_) => value.trim().to_string(),
    }
}

/// Build the filter selection from query parameters
fn selection_from_query(query: &PackageQuery) -> FilterSelection {
    FilterSelection {
        cities: split_list(query.cities.as_deref()).into_iter().collect(),
        hotel_ratings: split_list(query.ratings.as_deref())
            .iter()
            .filter_map(|r| r.parse::<u8>().ok())
            .collect(),
        durations: split_list(query.durations.as_deref())
            .iter()
            .map(|d| normalize_duration(d))
            .collect(),
        price_max: query.price_max,
    }
}

/// List packages endpoint
///
/// GET /api/v1/packages?destination=dubai&cities=Dubai,Abu%20Dhabi&ratings=4,5
///     &durations=5%20Nights&priceMax=100000&sort=price-low&page=0&pageSize=6
///
/// Store failures never fail the request; the response says where the data
/// came from instead.
async fn list_packages(
    state: web::Data<AppState>,
    query: web::Query<PackageQuery>,
) -> impl Responder {
    let Some(profile) = state.registry.get(&query.destination) else {
        return unknown_destination(&query.destination);
    };

    let loaded = state.loader.load_packages(profile).await;

    let page_size = query
        .page_size
        .unwrap_or(state.catalog.page_size)
        .clamp(1, state.catalog.max_page_size.max(1));

    let mut catalog = CatalogState::new(profile.clone(), page_size)
        .with_packages(loaded.items.as_ref().clone());
    catalog.dispatch(CatalogAction::SetFilter(FilterChange::Replace(selection_from_query(&query))));
    catalog.dispatch(CatalogAction::SetSort(SortKey::parse(query.sort.as_deref().unwrap_or_default())));
    catalog.dispatch(CatalogAction::SetPage(query.page.unwrap_or(0)));

    let response = PackageListResponse {
        destination: profile.slug.clone(),
        view: catalog.view(),
        source: loaded.source,
        notice: loaded.notice(),
    };

    tracing::info!(
        "Returning {} of {} packages for {} (page {}/{}, source {:?})",
        response.view.packages.len(),
        response.view.total_results,
        profile.slug,
        response.view.page + 1,
        response.view.total_pages,
        response.source
    );

    HttpResponse::Ok().insert_header(no_store()).json(response)
}

/// List city filters endpoint
///
/// GET /api/v1/city-filters?destination=dubai
///
/// City filters and packages load side by side; counts the store leaves out
/// come from the package list.
async fn list_city_filters(
    state: web::Data<AppState>,
    query: web::Query<DestinationQuery>,
) -> impl Responder {
    let Some(profile) = state.registry.get(&query.destination) else {
        return unknown_destination(&query.destination);
    };

    let (filters, packages) = tokio::join!(
        state.loader.load_city_filters(profile),
        state.loader.load_packages(profile)
    );

    let counts = city_counts(&packages.items, profile);
    let cities = if filters.items.is_empty() {
        counts
    } else {
        fill_missing_counts(&filters.items, &counts)
    };

    HttpResponse::Ok().insert_header(no_store()).json(CityFilterResponse {
        destination: profile.slug.clone(),
        cities,
        source: filters.source,
        notice: filters.notice(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_duration() {
        assert_eq!(normalize_duration("5 Nights 6 Days"), "5 Nights");
        assert_eq!(normalize_duration(" 4 "), "4 Nights");
        assert_eq!(normalize_duration("weekend"), "weekend");
    }

    #[test]
    fn test_selection_from_query() {
        let query = PackageQuery {
            destination: "dubai".to_string(),
            cities: Some("Dubai, Abu Dhabi".to_string()),
            ratings: Some("4,five,5".to_string()),
            durations: Some("5".to_string()),
            price_max: Some(90_000),
            ..Default::default()
        };

        let selection = selection_from_query(&query);

        assert_eq!(selection.cities.len(), 2);
        assert_eq!(selection.hotel_ratings.iter().copied().collect::<Vec<_>>(), vec![4, 5]);
        assert!(selection.durations.contains("5 Nights"));
        assert_eq!(selection.price_max, Some(90_000));
    }
}
