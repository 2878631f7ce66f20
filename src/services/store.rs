use crate::models::{CityFilter, Itinerary, Package};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the package store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Store returned status {status}: {message}")]
    StatusError { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// Transport and status failures; callers fall back to other data for these
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::RequestError(_) | StoreError::StatusError { .. })
    }
}

/// Document collections exposed by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Packages,
    Itineraries,
}

impl Collection {
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Packages => "packages",
            Collection::Itineraries => "itineraries",
        }
    }
}

/// HTTP client for the package store
///
/// Handles all communication with the document store including:
/// - Listing packages and city filters per destination
/// - Looking up the itinerary of a package
/// - Admin document writes
pub struct StoreClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl StoreClient {
    /// Create a new store client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Cache-Control", "no-store");
        match &self.api_key {
            Some(key) => request.header("X-Api-Key", key),
            None => request,
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, StoreError> {
        tracing::debug!("Fetching from store: {}", url);

        let response = self.with_headers(self.client.get(url)).send().await?;
        read_json(response).await
    }

    /// Fetch every package listed for a destination
    ///
    /// Accepts `{packages: [...]}`, `{documents: [...]}`, `{data: [...]}` or a
    /// bare array. Payloads of any other shape read as an empty list.
    pub async fn fetch_packages(&self, destination: &str) -> Result<Vec<Package>, StoreError> {
        let url = format!(
            "{}/packages?destination={}&_t={}",
            self.base_url,
            urlencoding::encode(destination),
            chrono::Utc::now().timestamp_millis()
        );

        let json = self.get_json(&url).await?;
        let packages: Vec<Package> = decode_documents(&json, "packages");

        tracing::debug!("Fetched {} packages for {}", packages.len(), destination);
        Ok(packages)
    }

    /// Fetch the city filter list for a destination
    ///
    /// Entries may be `{name, count}` objects or bare strings.
    pub async fn fetch_city_filters(&self, destination: &str) -> Result<Vec<CityFilter>, StoreError> {
        let url = format!(
            "{}/city-filters?destination={}",
            self.base_url,
            urlencoding::encode(destination)
        );

        let json = self.get_json(&url).await?;
        let filters = document_list(&json, "cities")
            .into_iter()
            .filter_map(|doc| match doc {
                Value::String(name) => Some(CityFilter { name: name.clone(), count: None }),
                other => serde_json::from_value(unwrap_data(other).clone()).ok(),
            })
            .filter(|filter: &CityFilter| !filter.name.trim().is_empty())
            .collect();

        Ok(filters)
    }

    /// Find the itinerary belonging to a package
    pub async fn fetch_itinerary(&self, package_id: &str) -> Result<Itinerary, StoreError> {
        let url = format!(
            "{}/itineraries?packageId={}",
            self.base_url,
            urlencoding::encode(package_id)
        );

        let json = self.get_json(&url).await?;
        let itineraries: Vec<Itinerary> = decode_documents(&json, "itineraries");

        itineraries
            .into_iter()
            .find(|itinerary| itinerary.package_id == package_id)
            .ok_or_else(|| StoreError::NotFound(format!("Itinerary not found for package {}", package_id)))
    }

    /// Create a document, assigning an id when the body has none
    pub async fn create_document(
        &self,
        collection: Collection,
        mut document: Value,
    ) -> Result<Value, StoreError> {
        let url = format!("{}/{}", self.base_url, collection.path());

        if let Some(obj) = document.as_object_mut() {
            let has_id = obj.get("id").and_then(Value::as_str).is_some_and(|id| !id.is_empty());
            if !has_id {
                obj.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
            }
        }

        let response = self
            .with_headers(self.client.post(&url))
            .json(&document)
            .send()
            .await?;

        let stored = read_json_or_null(response).await?;
        tracing::debug!("Created document in {}", collection.path());

        Ok(if stored.is_null() { document } else { stored })
    }

    /// Replace a document by id
    pub async fn update_document(
        &self,
        collection: Collection,
        id: &str,
        document: Value,
    ) -> Result<Value, StoreError> {
        let url = format!("{}/{}/{}", self.base_url, collection.path(), urlencoding::encode(id));

        let response = self
            .with_headers(self.client.put(&url))
            .json(&document)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!("{} {}", collection.path(), id)));
        }

        let stored = read_json_or_null(response).await?;
        tracing::debug!("Updated document {} in {}", id, collection.path());

        Ok(if stored.is_null() { document } else { stored })
    }

    /// Delete a document by id
    pub async fn delete_document(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}/{}", self.base_url, collection.path(), urlencoding::encode(id));

        let response = self.with_headers(self.client.delete(&url)).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!("{} {}", collection.path(), id)));
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        tracing::debug!("Deleted document {} from {}", id, collection.path());
        Ok(())
    }
}

async fn status_error(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
    tracing::error!("Store request failed: {} - {}", status, body);

    StoreError::StatusError {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("unknown").to_string(),
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, StoreError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse body: {}", e)))
}

async fn read_json_or_null(response: reqwest::Response) -> Result<Value, StoreError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body)
        .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse body: {}", e)))
}

/// Store documents are sometimes wrapped as `{ "data": {...} }`
fn unwrap_data(doc: &Value) -> &Value {
    match doc.get("data") {
        Some(inner) if inner.is_object() => inner,
        _ => doc,
    }
}

/// Locate the document array in any of the response shapes the store uses
pub fn document_list<'a>(json: &'a Value, key: &str) -> Vec<&'a Value> {
    let list = match json {
        Value::Array(items) => Some(items),
        Value::Object(_) => [key, "documents", "data"]
            .iter()
            .find_map(|k| json.get(*k).and_then(Value::as_array)),
        _ => None,
    };

    match list {
        Some(items) => items.iter().collect(),
        None => {
            tracing::warn!("Store payload has no `{}` list, treating as empty", key);
            vec![]
        }
    }
}

/// Decode each document, skipping the ones that do not fit `T`
pub fn decode_documents<T: DeserializeOwned>(json: &Value, key: &str) -> Vec<T> {
    document_list(json, key)
        .into_iter()
        .filter_map(|doc| match serde_json::from_value(unwrap_data(doc).clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping undecodable {} document: {}", key, e);
                None
            }
        })
        .collect()
}
