//! Error rendering.
//!
//! Every failure leaves the API as `{"error": "<CODE>", "message": "<text>"}`.
//! Insufficient stock also carries the `available` quantity so the caller can
//! offer a smaller order.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use stockbook_core::InventoryError;
use stockbook_shared::AppError;
use tracing::error;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An error returned from a handler.
#[derive(Debug)]
pub enum ApiError {
    /// Failure reported by the inventory core or its repositories.
    Inventory(InventoryError),
    /// Request-level failure (principal, role, malformed body).
    App(AppError),
}

impl From<InventoryError> for ApiError {
    fn from(err: InventoryError) -> Self {
        Self::Inventory(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::App(AppError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::App(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::App(AppError::Validation(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        let code = match self {
            Self::Inventory(err) => err.http_status_code(),
            Self::App(err) => err.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn message(&self) -> String {
        match self {
            // Store details stay in the logs.
            Self::Inventory(InventoryError::PersistenceFailure { transient: true, .. }) => {
                "The store is busy, please retry".to_string()
            }
            Self::Inventory(InventoryError::PersistenceFailure { .. }) => {
                "Internal server error".to_string()
            }
            Self::Inventory(err) => err.to_string(),
            Self::App(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            Self::Inventory(InventoryError::InsufficientStock { available, .. }) => json!({
                "error": "INSUFFICIENT_STOCK",
                "message": self.message(),
                "available": available,
            }),
            Self::Inventory(err) => json!({ "error": err.error_code(), "message": self.message() }),
            Self::App(err) => json!({ "error": err.error_code(), "message": self.message() }),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self, "request failed");
        }

        (status, Json(body)).into_response()
    }
}
