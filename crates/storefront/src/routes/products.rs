//! Catalog browsing routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use maplewick_core::{Product, ProductCategory, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::{AppState, Page};

/// Filters for the product index. All optional and combined with AND.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    /// Category wire name (`drinkware`, `personalized`, `home-decor`).
    pub category: Option<String>,
    /// Exact tag match.
    pub tag: Option<String>,
    /// Case-insensitive substring of name or description.
    pub q: Option<String>,
}

impl ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if ProductCategory::parse(category) != Some(product.category) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !product.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(q) = &self.q {
            let q = q.to_lowercase();
            if !product.name.to_lowercase().contains(&q)
                && !product.description.to_lowercase().contains(&q)
            {
                return false;
            }
        }
        true
    }
}

/// GET /api/products - list the mirrored catalog, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<Product>> {
    let products = state
        .catalog()
        .products()
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect();
    Json(products)
}

/// GET /api/products/{id} - one product's detail.
///
/// Viewing a product also points the navigation surface at the product
/// detail page with that product selected.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .product_by_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    state.navigate(Page::Product, Some(id));
    Ok(Json(product))
}
