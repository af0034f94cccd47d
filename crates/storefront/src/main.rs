//! Maplewick Storefront - handmade goods shop service.
//!
//! This binary serves the storefront JSON API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework exposing the `/api` surface
//! - Catalog mirror fed by a polled HTTP feed or a static seed file
//! - Single persistent cart stored as a JSON slot on disk
//! - Catalog writes proxied to an external admin gateway
//!
//! The storefront never owns catalog data: products are mirrored from the
//! external authority and admin writes round-trip through it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use sentry::integrations::tracing as sentry_tracing;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maplewick_storefront::cart_store::CartStore;
use maplewick_storefront::catalog::{CatalogMirror, feed};
use maplewick_storefront::config::StorefrontConfig;
use maplewick_storefront::gateway::GatewayClient;
use maplewick_storefront::routes;
use maplewick_storefront::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Build the mirror for the configured catalog strategy, spawning the feed
/// poller when a live feed is configured.
fn init_catalog(config: &StorefrontConfig) -> CatalogMirror {
    match &config.catalog.feed_url {
        Some(url) => {
            // Starts empty; the first poll fills it.
            let mirror = CatalogMirror::empty();
            tokio::spawn(feed::run_poller(
                mirror.clone(),
                reqwest::Client::new(),
                url.clone(),
                config.catalog.poll_interval,
            ));
            tracing::info!(url = %url, "Catalog feed poller started");
            mirror
        }
        None => {
            let products = feed::seed_products(config.catalog.seed_path.as_deref());
            tracing::info!(count = products.len(), "Catalog loaded from seed");
            CatalogMirror::new(products)
        }
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Initialize tracing with EnvFilter and Sentry integration
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maplewick_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let catalog = init_catalog(&config);

    let gateway = config
        .gateway
        .as_ref()
        .map(|gw| GatewayClient::new(gw, config.store_id.clone()))
        .transpose()
        .expect("Failed to build gateway client");
    if gateway.is_none() {
        tracing::warn!("No gateway configured; admin routes will answer 503");
    }

    let cart_store = CartStore::new(config.cart_path());
    let state = AppState::new(config.clone(), catalog, cart_store, gateway);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the cart data directory is writable before returning OK, since
/// every cart mutation persists there. The filesystem check runs on the
/// blocking pool to keep the probe path off the async workers.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let data_dir = state.config().data_dir.clone();
    let result = tokio::task::spawn_blocking(move || std::fs::create_dir_all(data_dir)).await;

    match result {
        Ok(Ok(())) => StatusCode::OK,
        Ok(Err(_)) | Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
