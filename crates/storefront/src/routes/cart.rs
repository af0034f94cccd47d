//! Cart routes.
//!
//! Mutations validate against the current catalog before touching the cart,
//! then persist and return the full cart view so the client never needs a
//! follow-up read.

use axum::Json;
use axum::extract::State;
use maplewick_core::{
    Cart, CartItemInput, Price, Product, ProductId, VariantSelection,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

// =============================================================================
// Views
// =============================================================================

/// One cart line enriched with current catalog data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    /// Current product name; absent when the product has left the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub variant_options: VariantSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalization: Option<String>,
    pub quantity: u32,
    /// Current unit price; zero when the product has left the catalog.
    pub unit_price: Price,
    pub line_total: Price,
    /// Whether the product is still in the catalog.
    pub available: bool,
}

/// The full cart as returned by every cart endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Total units across all lines.
    pub count: u64,
    /// Sum of line totals at current catalog prices.
    pub subtotal: Price,
}

impl CartView {
    fn build(cart: &Cart, state: &AppState) -> Self {
        let items = cart
            .items
            .iter()
            .map(|item| {
                let product = state.catalog().product_by_id(&item.product_id);
                let unit_price = product.as_ref().map_or(Price::ZERO, |p| p.price);
                CartLineView {
                    product_id: item.product_id.clone(),
                    name: product.as_ref().map(|p| p.name.clone()),
                    variant_options: item.variant_options.clone(),
                    personalization: item.personalization.clone(),
                    quantity: item.quantity,
                    unit_price,
                    line_total: item.line_total(unit_price),
                    available: product.is_some(),
                }
            })
            .collect();

        Self {
            items,
            count: cart.count(),
            subtotal: cart.total(|id| state.catalog().price_of(id)),
        }
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_options: VariantSelection,
    #[serde(default)]
    pub personalization: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_options: VariantSelection,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_options: VariantSelection,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/cart - the current cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::build(&state.cart(), &state))
}

/// POST /api/cart/items - add one unit of a purchasable configuration.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .product_by_id(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    validate_selection(&product, &request.variant_options)?;
    let personalization = validate_personalization(&product, request.personalization)?;

    let cart = state.add_to_cart(CartItemInput {
        product_id: request.product_id,
        variant_options: request.variant_options,
        personalization,
    });
    Ok(Json(CartView::build(&cart, &state)))
}

/// PATCH /api/cart/items - set the quantity of matching line(s).
///
/// Matching ignores personalization; a non-positive quantity drops the
/// line(s). Updating a line that is not in the cart is a no-op.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateItemRequest>,
) -> Json<CartView> {
    let cart = state.update_cart_quantity(
        &request.product_id,
        &request.variant_options,
        request.quantity,
    );
    Json(CartView::build(&cart, &state))
}

/// DELETE /api/cart/items - remove matching line(s), personalization ignored.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveItemRequest>,
) -> Json<CartView> {
    let cart = state.remove_from_cart(&request.product_id, &request.variant_options);
    Json(CartView::build(&cart, &state))
}

/// POST /api/cart/clear - empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.clear_cart();
    Json(CartView::build(&cart, &state))
}

/// POST /api/checkout - placeholder until a payment integration exists.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Json<CartView>> {
    if state.cart().is_empty() {
        return Err(AppError::BadRequest("Your cart is empty.".to_owned()));
    }

    Err(AppError::NotImplemented(
        "Checkout functionality coming soon! This is a demo store.".to_owned(),
    ))
}

// =============================================================================
// Validation
// =============================================================================

/// A selection is valid when every variant the product defines has one of
/// its listed options chosen, and nothing else is selected.
fn validate_selection(product: &Product, selection: &VariantSelection) -> Result<()> {
    for variant in &product.variants {
        match selection.option_for(&variant.id) {
            Some(option) if variant.offers(option) => {}
            Some(option) => {
                return Err(AppError::BadRequest(format!(
                    "\"{option}\" is not an option for {}",
                    variant.name
                )));
            }
            None => {
                return Err(AppError::BadRequest(format!(
                    "please choose a {}",
                    variant.name
                )));
            }
        }
    }

    for (variant_id, _) in selection.iter() {
        if product.variant(variant_id).is_none() {
            return Err(AppError::BadRequest(format!(
                "unknown variant \"{variant_id}\""
            )));
        }
    }

    Ok(())
}

/// Trim personalization; empty collapses to absent, and any remaining text
/// is rejected for products that do not allow it.
fn validate_personalization(
    product: &Product,
    personalization: Option<String>,
) -> Result<Option<String>> {
    let trimmed = personalization
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty());

    if trimmed.is_some() && !product.allows_personalization {
        return Err(AppError::BadRequest(format!(
            "{} cannot be personalized",
            product.name
        )));
    }

    Ok(trimmed)
}
