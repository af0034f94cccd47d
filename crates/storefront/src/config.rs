//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MAPLEWICK_STORE_ID` - Tenant identifier sent with every gateway call
//!
//! ## Optional
//! - `MAPLEWICK_HOST` - Bind address (default: 127.0.0.1)
//! - `MAPLEWICK_PORT` - Listen port (default: 3000)
//! - `MAPLEWICK_DATA_DIR` - Directory for the persistent cart slot (default: ./data)
//! - `MAPLEWICK_FEED_URL` - Catalog feed endpoint; when set, the mirror polls
//!   it for wholesale replacements instead of loading a static seed
//! - `MAPLEWICK_FEED_POLL_SECS` - Feed poll interval in seconds (default: 30)
//! - `MAPLEWICK_SEED_PATH` - Static seed catalog file, used when no feed is
//!   configured (falls back to the built-in catalog when unset)
//! - `MAPLEWICK_GATEWAY_URL` - Product admin gateway base URL; admin routes
//!   return 503 when unset
//! - `MAPLEWICK_GATEWAY_TOKEN` - Bearer token forwarded to the gateway
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use maplewick_core::StoreId;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Store/tenant identifier for gateway calls
    pub store_id: StoreId,
    /// Directory holding the persistent cart slot
    pub data_dir: PathBuf,
    /// Catalog mirror configuration
    pub catalog: CatalogConfig,
    /// Product admin gateway configuration (admin routes disabled when absent)
    pub gateway: Option<GatewayConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Catalog mirror configuration: live feed or static seed.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Live feed endpoint delivering the full product list as a JSON array
    pub feed_url: Option<Url>,
    /// How often to poll the feed
    pub poll_interval: Duration,
    /// Static seed file used when no feed is configured
    pub seed_path: Option<PathBuf>,
}

/// Product admin gateway configuration.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Gateway base URL; callable operations are POSTed to `{base}/{name}`
    pub base_url: Url,
    /// Bearer token forwarded with every call
    pub auth_token: Option<SecretString>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url.as_str())
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MAPLEWICK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAPLEWICK_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("MAPLEWICK_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAPLEWICK_PORT".to_owned(), e.to_string()))?;
        let store_id = StoreId::new(get_required_env("MAPLEWICK_STORE_ID")?);
        let data_dir = PathBuf::from(get_env_or_default("MAPLEWICK_DATA_DIR", "./data"));

        let catalog = CatalogConfig::from_env()?;
        let gateway = GatewayConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            store_id,
            data_dir,
            catalog,
            gateway,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the single named cart slot inside the data directory.
    #[must_use]
    pub fn cart_path(&self) -> PathBuf {
        self.data_dir.join("cart.json")
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let feed_url = parse_optional_url("MAPLEWICK_FEED_URL")?;
        let poll_secs = get_env_or_default("MAPLEWICK_FEED_POLL_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MAPLEWICK_FEED_POLL_SECS".to_owned(), e.to_string())
            })?;
        let seed_path = get_optional_env("MAPLEWICK_SEED_PATH").map(PathBuf::from);

        Ok(Self {
            feed_url,
            poll_interval: Duration::from_secs(poll_secs.max(1)),
            seed_path,
        })
    }
}

impl GatewayConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(base_url) = parse_optional_url("MAPLEWICK_GATEWAY_URL")? else {
            return Ok(None);
        };

        Ok(Some(Self {
            base_url,
            auth_token: get_optional_env("MAPLEWICK_GATEWAY_TOKEN").map(SecretString::from),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an optional environment variable as a URL.
fn parse_optional_url(key: &str) -> Result<Option<Url>, ConfigError> {
    get_optional_env(key)
        .map(|value| {
            Url::parse(&value)
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            store_id: StoreId::new("maplewick_handmade"),
            data_dir: PathBuf::from("./data"),
            catalog: CatalogConfig {
                feed_url: None,
                poll_interval: Duration::from_secs(30),
                seed_path: None,
            },
            gateway: Some(GatewayConfig {
                base_url: Url::parse("https://functions.example.com/api").unwrap(),
                auth_token: Some(SecretString::from("super_secret_token")),
            }),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_cart_path_joins_data_dir() {
        let config = test_config();
        assert_eq!(config.cart_path(), PathBuf::from("./data/cart.json"));
    }

    #[test]
    fn test_gateway_config_debug_redacts_token() {
        let config = test_config();
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("functions.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
