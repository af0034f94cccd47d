//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::cart_store::CartStoreError;
use crate::gateway::GatewayError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input failed validation before any state change.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required collaborator is not configured.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// A surface that exists but is not built yet.
    #[error("{0}")]
    NotImplemented(String),

    /// Admin gateway operation failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Cart persistence failed.
    #[error("Cart store error: {0}")]
    CartStore(#[from] CartStoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::CartStore(_) | Self::Internal(_) | Self::Gateway(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::CartStore(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients; gateway failures
        // carry a descriptive reason meant for the initiating user.
        let message = match &self {
            Self::CartStore(_) | Self::Internal(_) => "Internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
