//! Product admin gateway client.
//!
//! Catalog writes go through an external authority exposing three callable
//! operations. Each call POSTs an envelope `{"data": {..., "storeId"}}` to
//! `{base_url}/{operation}` and the authority answers `{"result": ...}` on
//! success or `{"error": {"message": ...}}` on failure. The gateway never
//! mutates local state: a successful write is observed later through the
//! catalog feed, never applied optimistically.

use maplewick_core::{ProductData, ProductId, StoreId};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use url::Url;

use crate::config::GatewayConfig;

/// Errors that can occur when calling the admin gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The authority rejected the operation.
    #[error("{operation} failed: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    /// Failed to build the client or parse a response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The gateway base URL cannot be extended with an operation name.
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),
}

/// Error half of a callable response envelope.
#[derive(Debug, Deserialize)]
struct CallError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallResponse {
    error: Option<CallError>,
}

/// Client for the external product-admin authority.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: Url,
    store_id: StoreId,
}

impl GatewayClient {
    /// Create a new gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the configured
    /// auth token is not a valid header value.
    pub fn new(config: &GatewayConfig, store_id: StoreId) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.auth_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| GatewayError::Parse(format!("Invalid auth token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            store_id,
        })
    }

    /// Ask the authority to create a product.
    ///
    /// # Errors
    ///
    /// Returns the authority's failure reason if the call is rejected.
    pub async fn create_product(&self, product: &ProductData) -> Result<(), GatewayError> {
        self.call("addProduct", json!({ "productData": product }))
            .await
    }

    /// Ask the authority to update a product's fields by ID.
    ///
    /// # Errors
    ///
    /// Returns the authority's failure reason if the call is rejected.
    pub async fn update_product(
        &self,
        id: &ProductId,
        updates: &ProductData,
    ) -> Result<(), GatewayError> {
        self.call("updateProduct", json!({ "productId": id, "updates": updates }))
            .await
    }

    /// Ask the authority to delete a product by ID.
    ///
    /// # Errors
    ///
    /// Returns the authority's failure reason if the call is rejected.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), GatewayError> {
        self.call("deleteProduct", json!({ "productId": id })).await
    }

    /// Invoke one callable operation with the store ID stamped in.
    async fn call(&self, operation: &'static str, data: Value) -> Result<(), GatewayError> {
        let url = self
            .base_url
            .join(operation)
            .map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
        let body = envelope(data, &self.store_id);

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<CallResponse>()
                .await
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("gateway returned status {status}"));
            return Err(GatewayError::Rejected { operation, message });
        }

        // Some callable hosts report failures in-band with a 200.
        let parsed: CallResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))?;
        if let Some(message) = parsed.error.and_then(|e| e.message) {
            return Err(GatewayError::Rejected { operation, message });
        }

        Ok(())
    }
}

/// Build the callable request envelope: the payload plus the store ID under
/// a single `data` key.
fn envelope(mut data: Value, store_id: &StoreId) -> Value {
    if let Some(map) = data.as_object_mut() {
        map.insert("storeId".to_owned(), json!(store_id));
    }
    json!({ "data": data })
}
