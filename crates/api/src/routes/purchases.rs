//! Purchase (restock) routes.
//!
//! Purchases cannot be cancelled; there is no delete route.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection, QueryRejection}},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use stockbook_core::lifecycle::{CreatePurchase, Purchase, PurchaseFilter};
use stockbook_db::PurchaseRepository;
use stockbook_shared::types::{ItemId, PageResponse, PurchaseId, SupplierId};
use tracing::info;

use super::PageQuery;
use crate::{
    AppState,
    authz::{Action, authorize},
    error::ApiResult,
    middleware::AuthPrincipal,
};

/// Creates the purchase routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list_purchases).post(create_purchase))
        .route("/purchases/{purchase_id}", get(get_purchase))
}

/// Query parameters for listing purchases.
#[derive(Debug, Deserialize)]
pub struct ListPurchasesQuery {
    /// Only purchases of this item.
    pub item_id: Option<ItemId>,
    /// Only purchases from this supplier.
    pub supplier_id: Option<SupplierId>,
    /// Page number (1-indexed, default: 1).
    pub page: Option<u32>,
    /// Items per page (default: 20, max: 100).
    pub per_page: Option<u32>,
}

fn repository(state: &AppState) -> PurchaseRepository {
    PurchaseRepository::new(state.conn()).with_max_attempts(state.inventory.max_attempts)
}

/// GET `/purchases` - List purchases newest first.
async fn list_purchases(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    query: Result<Query<ListPurchasesQuery>, QueryRejection>,
) -> ApiResult<Json<PageResponse<Purchase>>> {
    authorize(&principal, Action::View)?;
    let Query(query) = query?;

    let filter = PurchaseFilter {
        item_id: query.item_id,
        supplier_id: query.supplier_id,
    };
    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .page_request();

    Ok(Json(repository(&state).list_purchases(filter, page).await?))
}

/// POST `/purchases` - Record a restock.
async fn create_purchase(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    payload: Result<Json<CreatePurchase>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Purchase>)> {
    authorize(&principal, Action::RecordPurchase)?;
    let Json(cmd) = payload?;

    let purchase = repository(&state).create_purchase(cmd).await?;
    info!(purchase_id = %purchase.id, user_id = %principal.user_id, "purchase recorded via api");
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// GET `/purchases/{purchase_id}`
async fn get_purchase(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    purchase_id: Result<Path<PurchaseId>, PathRejection>,
) -> ApiResult<Json<Purchase>> {
    authorize(&principal, Action::View)?;
    let Path(purchase_id) = purchase_id?;

    Ok(Json(repository(&state).get_purchase(purchase_id).await?))
}
