//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for the catalog, orders, purchases, invoices and reports
//! - The principal extractor and role policy
//! - Error rendering for inventory and request failures

pub mod authz;
pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use stockbook_shared::config::InventoryConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Retry bound and report settings.
    pub inventory: InventoryConfig,
}

impl AppState {
    /// Creates application state.
    #[must_use]
    pub fn new(db: DatabaseConnection, inventory: InventoryConfig) -> Self {
        Self {
            db: Arc::new(db),
            inventory,
        }
    }

    /// Returns an owned handle to the connection pool for a repository.
    #[must_use]
    pub fn conn(&self) -> DatabaseConnection {
        (*self.db).clone()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
