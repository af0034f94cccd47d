//! Catalog administration routes.
//!
//! These routes never touch the local mirror. Writes are validated, handed
//! to the external gateway, and acknowledged with 202 Accepted; the change
//! becomes visible once the catalog feed delivers it. With no gateway
//! configured the routes answer 503.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use maplewick_core::{ProductData, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::gateway::GatewayClient;
use crate::state::AppState;

/// Acknowledgement body for accepted admin operations.
#[derive(Debug, Serialize)]
pub struct Accepted {
    pub status: &'static str,
}

const ACCEPTED: Accepted = Accepted { status: "accepted" };

fn gateway(state: &AppState) -> Result<&GatewayClient> {
    state.gateway().ok_or_else(|| {
        AppError::Unavailable("product administration is not configured".to_owned())
    })
}

/// Reject payloads the gateway would store but the shop could not sell.
fn validate_product_data(data: &ProductData) -> Result<()> {
    if data.name.trim().is_empty() {
        return Err(AppError::BadRequest("product name is required".to_owned()));
    }
    if data.images.is_empty() {
        return Err(AppError::BadRequest(
            "at least one product image is required".to_owned(),
        ));
    }
    if data.price.amount().is_sign_negative() {
        return Err(AppError::BadRequest(
            "price cannot be negative".to_owned(),
        ));
    }
    Ok(())
}

/// POST /api/admin/products - ask the gateway to create a product.
#[instrument(skip(state, data), fields(product_name = %data.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<ProductData>,
) -> Result<(StatusCode, Json<Accepted>)> {
    validate_product_data(&data)?;
    gateway(&state)?.create_product(&data).await?;

    tracing::info!(name = %data.name, "Product creation accepted");
    Ok((StatusCode::ACCEPTED, Json(ACCEPTED)))
}

/// PATCH /api/admin/products/{id} - ask the gateway to update a product.
#[instrument(skip(state, data))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(data): Json<ProductData>,
) -> Result<(StatusCode, Json<Accepted>)> {
    validate_product_data(&data)?;
    gateway(&state)?.update_product(&id, &data).await?;

    tracing::info!(product_id = %id, "Product update accepted");
    Ok((StatusCode::ACCEPTED, Json(ACCEPTED)))
}

/// DELETE /api/admin/products/{id} - ask the gateway to delete a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<(StatusCode, Json<Accepted>)> {
    gateway(&state)?.delete_product(&id).await?;

    tracing::info!(product_id = %id, "Product deletion accepted");
    Ok((StatusCode::ACCEPTED, Json(ACCEPTED)))
}
