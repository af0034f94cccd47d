//! End-to-end tests of the storefront API over the in-process router.

#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use maplewick_core::StoreId;
use serde_json::{Value, json};
use tower::ServiceExt;

use maplewick_storefront::cart_store::CartStore;
use maplewick_storefront::catalog::{CatalogMirror, seed};
use maplewick_storefront::config::{CatalogConfig, StorefrontConfig};
use maplewick_storefront::routes;
use maplewick_storefront::state::AppState;

fn test_state(data_dir: &Path) -> AppState {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        store_id: StoreId::new("test_store"),
        data_dir: data_dir.to_path_buf(),
        catalog: CatalogConfig {
            feed_url: None,
            poll_interval: Duration::from_secs(30),
            seed_path: None,
        },
        gateway: None,
        sentry_dsn: None,
    };
    let cart_store = CartStore::new(config.cart_path());
    AppState::new(
        config,
        CatalogMirror::new(seed::default_catalog()),
        cart_store,
        None,
    )
}

fn app(state: AppState) -> Router {
    Router::new().nest("/api", routes::routes()).with_state(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn add_tumbler(personalization: Option<&str>) -> Value {
    let mut body = json!({
        "productId": "1",
        "variantOptions": { "size": "12 oz" },
    });
    if let Some(name) = personalization {
        body["personalization"] = json!(name);
    }
    body
}

#[tokio::test]
async fn adding_the_same_configuration_merges_lines() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    let (status, _) = send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, cart) = send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(cart["count"], 2);
    // Seed price for product 1 is $24.99.
    assert_eq!(cart["subtotal"], "49.98");
}

#[tokio::test]
async fn personalization_splits_lines_but_removal_sweeps_them() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    send(&app, "POST", "/api/cart/items", Some(add_tumbler(Some("Alice")))).await;
    send(&app, "POST", "/api/cart/items", Some(add_tumbler(Some("Bob")))).await;

    let (_, cart) = send(&app, "GET", "/api/cart", None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);

    let (_, cart) = send(
        &app,
        "DELETE",
        "/api/cart/items",
        Some(json!({ "productId": "1", "variantOptions": { "size": "12 oz" } })),
    )
    .await;
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn quantity_update_clamps_and_drops_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
    send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;

    let update = |quantity: i64| {
        json!({
            "productId": "1",
            "variantOptions": { "size": "12 oz" },
            "quantity": quantity,
        })
    };

    let (_, cart) = send(&app, "PATCH", "/api/cart/items", Some(update(1))).await;
    assert_eq!(cart["items"][0]["quantity"], 1);

    let (_, cart) = send(&app, "PATCH", "/api/cart/items", Some(update(-5))).await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    // Updating an absent line is a no-op, not an error.
    let (status, cart) = send(&app, "PATCH", "/api/cart/items", Some(update(3))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cart["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn add_validates_against_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    // Unknown product.
    let (status, _) = send(
        &app,
        "POST",
        "/api/cart/items",
        Some(json!({ "productId": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Missing variant choice.
    let (status, body) = send(
        &app,
        "POST",
        "/api/cart/items",
        Some(json!({ "productId": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Size"));

    // Option not offered.
    let (status, _) = send(
        &app,
        "POST",
        "/api/cart/items",
        Some(json!({ "productId": "1", "variantOptions": { "size": "64 oz" } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Personalization on a product that does not allow it (product 4).
    let (status, _) = send(
        &app,
        "POST",
        "/api/cart/items",
        Some(json!({
            "productId": "4",
            "variantOptions": { "size": "20 oz" },
            "personalization": "Alice",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing got into the cart along the way.
    let (_, cart) = send(&app, "GET", "/api/cart", None).await;
    assert_eq!(cart["count"], 0);
}

#[tokio::test]
async fn cart_survives_process_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let app = app(test_state(dir.path()));
        send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
        send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
    }

    // A fresh state over the same data dir resumes the persisted cart.
    let app = app(test_state(dir.path()));
    let (_, cart) = send(&app, "GET", "/api/cart", None).await;
    assert_eq!(cart["count"], 2);
    assert_eq!(cart["items"][0]["productId"], "1");
}

#[tokio::test]
async fn clear_empties_the_cart() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
    let (status, cart) = send(&app, "POST", "/api/cart/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["count"], 0);
}

#[tokio::test]
async fn checkout_is_a_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    let (status, body) = send(&app, "POST", "/api/checkout", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request: Your cart is empty.");

    send(&app, "POST", "/api/cart/items", Some(add_tumbler(None))).await;
    let (status, body) = send(&app, "POST", "/api/checkout", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert!(body["error"].as_str().unwrap().contains("coming soon"));
}

#[tokio::test]
async fn product_browsing_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    let (status, products) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(products.as_array().unwrap().len(), 6);

    let (_, products) = send(&app, "GET", "/api/products?category=home-decor", None).await;
    assert_eq!(products.as_array().unwrap().len(), 1);

    let (_, products) = send(&app, "GET", "/api/products?tag=sports&q=dawgs", None).await;
    assert_eq!(products.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/api/products/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn viewing_a_product_updates_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    let (_, nav) = send(&app, "GET", "/api/navigation", None).await;
    assert_eq!(nav["page"], "home");

    let (status, _) = send(&app, "GET", "/api/products/2", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, nav) = send(&app, "GET", "/api/navigation", None).await;
    assert_eq!(nav["page"], "product");
    assert_eq!(nav["selectedProductId"], "2");

    // Leaving the product page drops the selection.
    let (_, nav) = send(
        &app,
        "POST",
        "/api/navigation",
        Some(json!({ "page": "about" })),
    )
    .await;
    assert_eq!(nav["page"], "about");
    assert!(nav.get("selectedProductId").is_none());

    // The product page demands a product that exists.
    let (status, _) = send(
        &app,
        "POST",
        "/api/navigation",
        Some(json!({ "page": "product", "productId": "missing" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/navigation",
        Some(json!({ "page": "product" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_answer_503_without_a_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    let payload = json!({
        "name": "Mug",
        "category": "drinkware",
        "price": "12.99",
        "description": "A mug.",
        "images": ["mug.jpg"],
        "allowsPersonalization": false,
        "inStock": true,
        "isMadeToOrder": false,
        "tags": [],
    });

    let (status, _) = send(&app, "POST", "/api/admin/products", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, "PATCH", "/api/admin/products/1", Some(payload)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = send(&app, "DELETE", "/api/admin/products/1", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn admin_validation_runs_before_the_gateway_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(test_state(dir.path()));

    // Invalid payloads fail 400 even though no gateway is configured.
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/products",
        Some(json!({
            "name": "   ",
            "category": "drinkware",
            "price": "12.99",
            "description": "",
            "images": ["mug.jpg"],
            "allowsPersonalization": false,
            "inStock": true,
            "isMadeToOrder": false,
            "tags": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}
