// Route exports
pub mod admin;
pub mod catalog;
pub mod contact;
pub mod itineraries;

use actix_web::{web, HttpResponse};
use crate::config::{AdminSettings, CatalogSettings, ContactSettings};
use crate::core::DestinationRegistry;
use crate::models::ErrorResponse;
use crate::services::{CatalogLoader, StoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<CatalogLoader>,
    pub registry: Arc<DestinationRegistry>,
    pub catalog: CatalogSettings,
    pub contact: ContactSettings,
    pub admin: AdminSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(catalog::configure)
            .configure(itineraries::configure)
            .configure(contact::configure)
            .configure(admin::configure),
    );
}

pub(crate) fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Map a store failure on a pass-through endpoint to an HTTP response
pub(crate) fn store_error_response(err: &StoreError) -> HttpResponse {
    use actix_web::http::StatusCode;

    match err {
        StoreError::NotFound(message) => error_response(StatusCode::NOT_FOUND, "Not found", message.clone()),
        StoreError::InvalidResponse(_) => {
            error_response(StatusCode::BAD_GATEWAY, "Invalid store response", err.to_string())
        }
        StoreError::RequestError(_) | StoreError::StatusError { .. } => {
            error_response(StatusCode::BAD_GATEWAY, "Package store unavailable", err.to_string())
        }
    }
}

pub(crate) fn unknown_destination(slug: &str) -> HttpResponse {
    error_response(
        actix_web::http::StatusCode::NOT_FOUND,
        "Unknown destination",
        format!("No destination named '{}'", slug),
    )
}
