//! Configuration validation.

use maplewick_storefront::config::{ConfigError, StorefrontConfig};

/// Load the storefront configuration from the environment and report it.
///
/// Secrets are covered by the config types' own `Debug` redaction, so the
/// report is safe to paste into an issue.
pub fn check() -> Result<(), ConfigError> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!(listen = %config.socket_addr(), store_id = ?config.store_id, "Server");
    tracing::info!(cart_path = %config.cart_path().display(), "Cart store");

    match &config.catalog.feed_url {
        Some(url) => tracing::info!(
            url = %url,
            poll_interval = ?config.catalog.poll_interval,
            "Catalog: live feed"
        ),
        None => match &config.catalog.seed_path {
            Some(path) => tracing::info!(path = %path.display(), "Catalog: seed file"),
            None => tracing::info!("Catalog: built-in starter catalog"),
        },
    }

    match &config.gateway {
        Some(gateway) => tracing::info!(gateway = ?gateway, "Admin gateway configured"),
        None => tracing::warn!("No admin gateway configured; admin routes will answer 503"),
    }

    if config.sentry_dsn.is_none() {
        tracing::warn!("No Sentry DSN configured");
    }

    tracing::info!("Configuration OK");
    Ok(())
}
