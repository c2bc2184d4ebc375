//! API route definitions.

use axum::Router;
use serde::Deserialize;
use stockbook_shared::types::PageRequest;

use crate::AppState;

pub mod health;
pub mod invoices;
pub mod items;
pub mod orders;
pub mod parties;
pub mod purchases;
pub mod reports;

/// Creates the API router with all routes.
///
/// Every route except `/health` requires a principal.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(items::routes())
        .merge(parties::routes())
        .merge(orders::routes())
        .merge(purchases::routes())
        .merge(invoices::routes())
        .merge(reports::routes())
}

/// Pagination query parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed, default: 1).
    pub page: Option<u32>,
    /// Items per page (default: 20, max: 100).
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Converts the query into a clamped page request.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }
}
