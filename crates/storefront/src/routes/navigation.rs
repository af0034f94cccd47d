//! Navigation surface routes.
//!
//! The storefront tracks one current page plus the product selected on the
//! product detail page, mirroring a single-window shop front.

use axum::Json;
use axum::extract::State;
use maplewick_core::ProductId;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::{AppState, NavigationState, Page};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateRequest {
    pub page: Page,
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

/// GET /api/navigation - where the storefront currently points.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<NavigationState> {
    Json(state.navigation())
}

/// POST /api/navigation - go to a page.
///
/// The product detail page requires a product that is currently in the
/// catalog; every other page drops any selected product.
#[instrument(skip(state))]
pub async fn go(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<NavigationState>> {
    let selected = match (request.page, request.product_id) {
        (Page::Product, Some(id)) => {
            if state.catalog().product_by_id(&id).is_none() {
                return Err(AppError::NotFound(format!("product {id}")));
            }
            Some(id)
        }
        (Page::Product, None) => {
            return Err(AppError::BadRequest(
                "the product page requires a productId".to_owned(),
            ));
        }
        _ => None,
    };

    Ok(Json(state.navigate(request.page, selected)))
}
