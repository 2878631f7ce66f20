use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;
use crate::models::{ItineraryPayload, PackagePayload};
use crate::routes::{error_response, store_error_response, AppState};
use crate::services::Collection;

/// Configure admin CRUD routes
///
/// Writes are proxied to the package store; listings pick them up on the next
/// fetch since list endpoints never serve from cache while the store is up.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/packages", web::post().to(create_package))
            .route("/packages/{id}", web::put().to(update_package))
            .route("/packages/{id}", web::delete().to(delete_package))
            .route("/itineraries", web::post().to(create_itinerary))
            .route("/itineraries/{id}", web::put().to(update_itinerary))
            .route("/itineraries/{id}", web::delete().to(delete_itinerary)),
    );
}

/// Check `X-Admin-Key` when an admin key is configured
fn authorize(state: &AppState, req: &HttpRequest) -> Result<(), HttpResponse> {
    let Some(expected) = state.admin.api_key.as_deref().filter(|k| !k.is_empty()) else {
        return Ok(());
    };

    let provided = req
        .headers()
        .get("X-Admin-Key")
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected) {
        Ok(())
    } else {
        tracing::warn!("Rejected admin request to {}", req.path());
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Missing or invalid admin key".to_string(),
        ))
    }
}

/// Deserialize the required fields out of a raw document and validate them
fn check_payload<T>(document: &Value) -> Result<T, HttpResponse>
where
    T: DeserializeOwned + Validate,
{
    let payload: T = serde_json::from_value(document.clone()).map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, "Invalid document", e.to_string())
    })?;

    payload.validate().map_err(|errors| {
        error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
    })?;

    Ok(payload)
}

/// Drop last-known data touched by a package write
async fn invalidate_for(state: &AppState, destination: Option<&str>) {
    match destination {
        Some(destination) => state.loader.invalidate(destination).await,
        None => state.loader.cache().invalidate_all(),
    }
}

/// POST /api/v1/admin/packages
async fn create_package(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &req) {
        return resp;
    }
    let payload: PackagePayload = match check_payload(&body) {
        Ok(payload) => payload,
        Err(resp) => return resp,
    };

    match state.loader.store().create_document(Collection::Packages, body.into_inner()).await {
        Ok(stored) => {
            invalidate_for(&state, payload.destination.as_deref()).await;
            tracing::info!("Created package '{}'", payload.title);
            HttpResponse::Created().json(stored)
        }
        Err(e) => {
            tracing::error!("Failed to create package: {}", e);
            store_error_response(&e)
        }
    }
}

/// PUT /api/v1/admin/packages/{id}
async fn update_package(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &req) {
        return resp;
    }
    if let Err(resp) = check_payload::<PackagePayload>(&body) {
        return resp;
    }
    let id = path.into_inner();

    match state.loader.store().update_document(Collection::Packages, &id, body.into_inner()).await {
        Ok(stored) => {
            // The package may have moved away from another destination
            invalidate_for(&state, None).await;
            tracing::info!("Updated package {}", id);
            HttpResponse::Ok().json(stored)
        }
        Err(e) => {
            tracing::error!("Failed to update package {}: {}", id, e);
            store_error_response(&e)
        }
    }
}

/// DELETE /api/v1/admin/packages/{id}
async fn delete_package(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &req) {
        return resp;
    }
    let id = path.into_inner();

    match state.loader.store().delete_document(Collection::Packages, &id).await {
        Ok(()) => {
            invalidate_for(&state, None).await;
            tracing::info!("Deleted package {}", id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => {
            tracing::error!("Failed to delete package {}: {}", id, e);
            store_error_response(&e)
        }
    }
}

/// POST /api/v1/admin/itineraries
async fn create_itinerary(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &req) {
        return resp;
    }
    let payload: ItineraryPayload = match check_payload(&body) {
        Ok(payload) => payload,
        Err(resp) => return resp,
    };

    match state.loader.store().create_document(Collection::Itineraries, body.into_inner()).await {
        Ok(stored) => {
            tracing::info!("Created itinerary for package {}", payload.package_id);
            HttpResponse::Created().json(stored)
        }
        Err(e) => {
            tracing::error!("Failed to create itinerary: {}", e);
            store_error_response(&e)
        }
    }
}

/// PUT /api/v1/admin/itineraries/{id}
async fn update_itinerary(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &req) {
        return resp;
    }
    if let Err(resp) = check_payload::<ItineraryPayload>(&body) {
        return resp;
    }
    let id = path.into_inner();

    match state.loader.store().update_document(Collection::Itineraries, &id, body.into_inner()).await {
        Ok(stored) => HttpResponse::Ok().json(stored),
        Err(e) => {
            tracing::error!("Failed to update itinerary {}: {}", id, e);
            store_error_response(&e)
        }
    }
}

/// DELETE /api/v1/admin/itineraries/{id}
async fn delete_itinerary(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    if let Err(resp) = authorize(&state, &req) {
        return resp;
    }
    let id = path.into_inner();

    match state.loader.store().delete_document(Collection::Itineraries, &id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => {
            tracing::error!("Failed to delete itinerary {}: {}", id, e);
            store_error_response(&e)
        }
    }
}
