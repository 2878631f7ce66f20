use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use holiday_catalog::config::Settings;
use holiday_catalog::core::DestinationRegistry;
use holiday_catalog::routes::{self, AppState};
use holiday_catalog::services::{spawn_city_filter_refresh, CatalogCache, CatalogLoader, StoreClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting holiday catalog service...");

    // Initialize package store client
    let timeout = Duration::from_secs(settings.store.timeout_secs.unwrap_or(30));
    let store = match StoreClient::new(settings.store.endpoint.clone(), settings.store.api_key.clone(), timeout) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to create store client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("Store client initialized for {}", store.base_url());

    let cache = Arc::new(CatalogCache::new(settings.cache.capacity, settings.cache.ttl_secs));
    info!("Catalog cache initialized (capacity: {}, TTL: {}s)", settings.cache.capacity, settings.cache.ttl_secs);

    let loader = Arc::new(CatalogLoader::new(store, cache));

    // Destination profiles: built-ins plus configured overrides
    let mut registry = DestinationRegistry::with_builtin();
    registry.apply_overrides(&settings.destinations);
    let registry = Arc::new(registry);

    info!("Serving destinations: {:?}", registry.slugs());

    let refresh_every = Duration::from_secs(settings.catalog.refresh_interval_secs.max(1));
    let _refresh = spawn_city_filter_refresh(loader.clone(), registry.clone(), refresh_every);

    info!("City filter refresh every {:?}", refresh_every);

    // Build application state
    let app_state = AppState {
        loader,
        registry,
        catalog: settings.catalog.clone(),
        contact: settings.contact.clone(),
        admin: settings.admin.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
