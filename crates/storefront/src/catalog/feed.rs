//! Catalog feed strategies.
//!
//! Two strategies keep the mirror populated:
//!
//! - **Live feed**: a background task polls a configured HTTP endpoint that
//!   returns the full product list as a JSON array, replacing the mirror
//!   wholesale on every delivery. A failed poll keeps the last good list -
//!   a transient fetch error is not a catalog revocation.
//! - **Static seed**: with no feed configured, the mirror is filled once at
//!   startup from a seed file, or from the built-in catalog when no seed
//!   file is configured either.

use std::fs;
use std::path::Path;
use std::time::Duration;

use maplewick_core::Product;
use thiserror::Error;
use url::Url;

use super::{CatalogMirror, decode, seed};

/// Errors from a single feed poll.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("feed payload is not a JSON array")]
    NotAnArray,
}

/// Load the startup product list for the static strategy.
///
/// A configured seed file that is missing or corrupt is logged and the
/// built-in catalog is used instead; catalog startup never fails.
#[must_use]
pub fn seed_products(seed_path: Option<&Path>) -> Vec<Product> {
    let Some(path) = seed_path else {
        return seed::default_catalog();
    };

    match read_seed_file(path) {
        Ok(products) => {
            tracing::info!(path = %path.display(), count = products.len(), "Loaded seed catalog");
            products
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load seed catalog; using built-in catalog");
            seed::default_catalog()
        }
    }
}

fn read_seed_file(path: &Path) -> Result<Vec<Product>, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let documents: Vec<serde_json::Value> = serde_json::from_str(&content)?;

    Ok(documents
        .iter()
        .filter_map(decode::product_from_document)
        .collect())
}

/// Poll the live feed forever, replacing the mirror wholesale on each
/// successful delivery. Intended to be spawned as a background task.
pub async fn run_poller(
    mirror: CatalogMirror,
    client: reqwest::Client,
    url: Url,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let result = fetch_documents(&client, &url).await;
        apply_poll_result(&mirror, &url, result);
    }
}

/// Fold one poll outcome into the mirror: a delivery replaces the list
/// wholesale, a failed poll keeps the last good list (the feed owner may
/// just be down).
fn apply_poll_result(
    mirror: &CatalogMirror,
    url: &Url,
    result: Result<Vec<serde_json::Value>, FeedError>,
) {
    match result {
        Ok(documents) => mirror.replace_documents(&documents),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Catalog feed poll failed");
        }
    }
}

/// Fetch one full catalog delivery from the feed endpoint.
///
/// # Errors
///
/// Returns `FeedError` if the request fails, the response status is not
/// successful, or the payload is not a JSON array.
pub async fn fetch_documents(client: &reqwest::Client, url: &Url) -> Result<Vec<serde_json::Value>, FeedError> {
    let payload: serde_json::Value = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    match payload {
        serde_json::Value::Array(documents) => Ok(documents),
        _ => Err(FeedError::NotAnArray),
    }
}
