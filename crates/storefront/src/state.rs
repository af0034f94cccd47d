//! Shared application state.
//!
//! `AppState` owns the catalog mirror, the single persistent cart, the
//! navigation surface, and the optional gateway client. It is cheaply
//! cloneable; all clones share the same inner state.

use std::sync::{Arc, Mutex, MutexGuard};

use maplewick_core::{Cart, CartItemInput, Price, ProductId, VariantSelection};
use serde::{Deserialize, Serialize};

use crate::cart_store::CartStore;
use crate::catalog::CatalogMirror;
use crate::config::StorefrontConfig;
use crate::gateway::GatewayClient;

// =============================================================================
// Navigation
// =============================================================================

/// The fixed set of storefront pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Shop,
    Product,
    Cart,
    Admin,
    About,
    Contact,
}

/// Where the storefront currently points: a page, plus the product being
/// viewed when the page is the product detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub page: Page,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_product_id: Option<ProductId>,
}

// =============================================================================
// AppState
// =============================================================================

/// Shared application state for all routes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogMirror,
    cart: Mutex<Cart>,
    cart_store: CartStore,
    navigation: Mutex<NavigationState>,
    gateway: Option<GatewayClient>,
}

impl AppState {
    /// Assemble the application state.
    ///
    /// The cart is loaded from the store's single slot up front, so the
    /// process resumes whatever cart the previous run persisted.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: CatalogMirror,
        cart_store: CartStore,
        gateway: Option<GatewayClient>,
    ) -> Self {
        let cart = cart_store.load();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                cart_store,
                navigation: Mutex::new(NavigationState::default()),
                gateway,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogMirror {
        &self.inner.catalog
    }

    #[must_use]
    pub fn gateway(&self) -> Option<&GatewayClient> {
        self.inner.gateway.as_ref()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.lock_cart().clone()
    }

    /// Total number of units across all cart lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.lock_cart().count()
    }

    /// Cart total priced against the current catalog. Lines whose product has
    /// left the catalog contribute zero.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        let catalog = &self.inner.catalog;
        self.lock_cart().total(|id| catalog.price_of(id))
    }

    /// Add a candidate line, merging with an existing line when the product,
    /// variant selection, and personalization all match.
    pub fn add_to_cart(&self, input: CartItemInput) -> Cart {
        self.mutate_cart(|cart| cart.add(input))
    }

    /// Remove every line matching (product, variant selection).
    pub fn remove_from_cart(
        &self,
        product_id: &ProductId,
        variant_options: &VariantSelection,
    ) -> Cart {
        self.mutate_cart(|cart| cart.remove(product_id, variant_options))
    }

    /// Set the quantity of every line matching (product, variant selection).
    pub fn update_cart_quantity(
        &self,
        product_id: &ProductId,
        variant_options: &VariantSelection,
        quantity: i64,
    ) -> Cart {
        self.mutate_cart(|cart| cart.set_quantity(product_id, variant_options, quantity))
    }

    /// Empty the cart.
    pub fn clear_cart(&self) -> Cart {
        self.mutate_cart(Cart::clear)
    }

    /// Apply a mutation to the cart, persist the result, and return the new
    /// snapshot. A persistence failure is logged and the in-memory cart stays
    /// authoritative for the rest of the run.
    ///
    /// The save happens under the cart lock so the slot on disk always
    /// observes mutations in the order they were applied; releasing the lock
    /// first would let a slower writer overwrite a newer snapshot with an
    /// older one. The lock is never held across an `.await`.
    fn mutate_cart<F: FnOnce(&mut Cart)>(&self, mutate: F) -> Cart {
        let mut cart = self.lock_cart();
        mutate(&mut cart);
        let snapshot = cart.clone();

        if let Err(e) = self.inner.cart_store.save(&snapshot) {
            tracing::error!(error = %e, "Failed to persist cart");
            sentry::capture_error(&e);
        }

        snapshot
    }

    fn lock_cart(&self) -> MutexGuard<'_, Cart> {
        self.inner
            .cart
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Current navigation state.
    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.lock_navigation().clone()
    }

    /// Point the storefront at a page. The selected product is recorded for
    /// the product detail page and cleared for every other page.
    pub fn navigate(&self, page: Page, selected_product_id: Option<ProductId>) -> NavigationState {
        let next = NavigationState {
            page,
            selected_product_id: match page {
                Page::Product => selected_product_id,
                _ => None,
            },
        };

        let mut navigation = self.lock_navigation();
        *navigation = next.clone();
        next
    }

    fn lock_navigation(&self) -> MutexGuard<'_, NavigationState> {
        self.inner
            .navigation
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
