use actix_web::{web, HttpResponse, Responder};
use crate::models::ItineraryQuery;
use crate::routes::{store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/itineraries", web::get().to(get_itinerary));
}

/// Itinerary of a package
///
/// GET /api/v1/itineraries?packageId={id}
async fn get_itinerary(
    state: web::Data<AppState>,
    query: web::Query<ItineraryQuery>,
) -> impl Responder {
    match state.loader.store().fetch_itinerary(&query.package_id).await {
        Ok(itinerary) => HttpResponse::Ok().json(itinerary),
        Err(e) => {
            tracing::warn!("Itinerary lookup failed for package {}: {}", query.package_id, e);
            store_error_response(&e)
        }
    }
}
