//! Sales order routes.
//!
//! Placing an order takes stock out; cancelling it puts the stock back.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection, QueryRejection}},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use stockbook_core::lifecycle::{CancelOrder, CreateOrder, Order, OrderCancellation, OrderFilter};
use stockbook_db::OrderRepository;
use stockbook_shared::types::{CustomerId, ItemId, OrderId, PageResponse};
use tracing::info;

use super::PageQuery;
use crate::{
    AppState,
    authz::{Action, authorize},
    error::ApiResult,
    middleware::AuthPrincipal,
};

/// Creates the order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{order_id}", get(get_order))
        .route("/orders/{order_id}/cancel", post(cancel_order))
}

/// Query parameters for listing orders.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// Only orders for this item.
    pub item_id: Option<ItemId>,
    /// Only orders for this customer.
    pub customer_id: Option<CustomerId>,
    /// Only invoiced (`true`) or open (`false`) orders.
    pub invoiced: Option<bool>,
    /// Page number (1-indexed, default: 1).
    pub page: Option<u32>,
    /// Items per page (default: 20, max: 100).
    pub per_page: Option<u32>,
}

fn repository(state: &AppState) -> OrderRepository {
    OrderRepository::new(state.conn()).with_max_attempts(state.inventory.max_attempts)
}

/// GET `/orders` - List orders newest first.
async fn list_orders(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> ApiResult<Json<PageResponse<Order>>> {
    authorize(&principal, Action::View)?;
    let Query(query) = query?;

    let filter = OrderFilter {
        item_id: query.item_id,
        customer_id: query.customer_id,
        invoiced: query.invoiced,
    };
    let page = PageQuery {
        page: query.page,
        per_page: query.per_page,
    }
    .page_request();

    Ok(Json(repository(&state).list_orders(filter, page).await?))
}

/// POST `/orders` - Sell stock.
async fn create_order(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    payload: Result<Json<CreateOrder>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    authorize(&principal, Action::CreateOrder)?;
    let Json(cmd) = payload?;

    let order = repository(&state).create_order(cmd).await?;
    info!(order_id = %order.id, user_id = %principal.user_id, "order placed via api");
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET `/orders/{order_id}`
async fn get_order(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    order_id: Result<Path<OrderId>, PathRejection>,
) -> ApiResult<Json<Order>> {
    authorize(&principal, Action::View)?;
    let Path(order_id) = order_id?;

    Ok(Json(repository(&state).get_order(order_id).await?))
}

/// POST `/orders/{order_id}/cancel` - Cancel an order and restore its stock.
async fn cancel_order(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    order_id: Result<Path<OrderId>, PathRejection>,
) -> ApiResult<Json<OrderCancellation>> {
    authorize(&principal, Action::CancelOrder)?;
    let Path(order_id) = order_id?;

    let cancellation = repository(&state)
        .cancel_order(CancelOrder { order_id })
        .await?;
    info!(%order_id, user_id = %principal.user_id, "order cancelled via api");
    Ok(Json(cancellation))
}
