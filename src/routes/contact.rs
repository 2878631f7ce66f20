use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{build_contact_message, whatsapp_url};
use crate::models::{ContactRequest, ContactResponse};
use crate::routes::{error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact", web::post().to(submit_contact));
}

/// Contact form endpoint
///
/// POST /api/v1/contact
///
/// Nothing is stored; the client opens the returned WhatsApp link.
async fn submit_contact(
    state: web::Data<AppState>,
    req: web::Json<ContactRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for contact request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let message = build_contact_message(&req);
    let url = whatsapp_url(&state.contact.whatsapp_number, &message);

    tracing::info!("Built WhatsApp contact link for {}", req.destination.as_deref().unwrap_or("general enquiry"));

    HttpResponse::Ok().json(ContactResponse {
        whatsapp_url: url,
        message,
    })
}
