//! Report routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use stockbook_core::reports::InventoryReport;
use stockbook_db::ReportRepository;

use crate::{
    AppState,
    authz::{Action, authorize},
    error::ApiResult,
    middleware::AuthPrincipal,
};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/inventory", get(inventory_report))
}

/// Query parameters overriding the configured report settings.
#[derive(Debug, Deserialize)]
pub struct InventoryReportQuery {
    /// Items strictly below this quantity count as low stock.
    pub low_stock_threshold: Option<i32>,
    /// How many recent orders and purchases to include.
    pub recent_limit: Option<u64>,
}

/// GET `/reports/inventory` - Stock value, sales and purchase totals, low stock.
async fn inventory_report(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    query: Result<Query<InventoryReportQuery>, QueryRejection>,
) -> ApiResult<Json<InventoryReport>> {
    authorize(&principal, Action::View)?;
    let Query(query) = query?;

    let threshold = query
        .low_stock_threshold
        .unwrap_or(state.inventory.low_stock_threshold);
    let recent_limit = query.recent_limit.unwrap_or(state.inventory.recent_limit);
    let recent_limit = usize::try_from(recent_limit).unwrap_or(usize::MAX);

    let report = ReportRepository::new(state.conn())
        .inventory_report(threshold, recent_limit)
        .await?;
    Ok(Json(report))
}
