//! HTTP route handlers.
//!
//! All storefront surfaces are JSON endpoints under `/api`:
//!
//! - `/api/products` - catalog browsing
//! - `/api/cart` - cart state and mutations
//! - `/api/checkout` - checkout placeholder
//! - `/api/navigation` - page navigation surface
//! - `/api/admin/products` - catalog writes, proxied to the gateway

pub mod admin;
pub mod cart;
pub mod navigation;
pub mod products;

use axum::Router;
use axum::routing::{get, patch, post};

use crate::state::AppState;

/// Build the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/navigation", get(navigation::show).post(navigation::go))
        .route("/cart", get(cart::show))
        .route(
            "/cart/items",
            post(cart::add).patch(cart::update).delete(cart::remove),
        )
        .route("/cart/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route("/admin/products", post(admin::create))
        .route(
            "/admin/products/{id}",
            patch(admin::update).delete(admin::delete),
        )
}
