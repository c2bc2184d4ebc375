//! Item catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection, QueryRejection}},
    http::StatusCode,
    routing::get,
};
use stockbook_core::catalog::{Item, NewItem};
use stockbook_db::ItemRepository;
use stockbook_shared::types::{ItemId, PageResponse};
use tracing::info;

use super::PageQuery;
use crate::{
    AppState,
    authz::{Action, authorize},
    error::ApiResult,
    middleware::AuthPrincipal,
};

/// Creates the item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{item_id}", get(get_item).delete(delete_item))
}

fn repository(state: &AppState) -> ItemRepository {
    ItemRepository::new(state.conn()).with_max_attempts(state.inventory.max_attempts)
}

/// GET `/items` - List items by name.
async fn list_items(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<PageResponse<Item>>> {
    authorize(&principal, Action::View)?;
    let Query(query) = query?;

    let items = repository(&state).list_items(query.page_request()).await?;
    Ok(Json(items))
}

/// POST `/items` - Add an item to the catalog.
async fn create_item(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    authorize(&principal, Action::CreateItem)?;
    let Json(input) = payload?;

    let item = repository(&state).create_item(input).await?;
    info!(item_id = %item.id, user_id = %principal.user_id, "item created via api");
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET `/items/{item_id}` - Get one item with its current quantity.
async fn get_item(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    item_id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<Json<Item>> {
    authorize(&principal, Action::View)?;
    let Path(item_id) = item_id?;

    Ok(Json(repository(&state).get_item(item_id).await?))
}

/// DELETE `/items/{item_id}` - Delete an item nothing references.
async fn delete_item(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    item_id: Result<Path<ItemId>, PathRejection>,
) -> ApiResult<StatusCode> {
    authorize(&principal, Action::DeleteCatalogRecord)?;
    let Path(item_id) = item_id?;

    repository(&state).delete_item(item_id).await?;
    info!(%item_id, user_id = %principal.user_id, "item deleted via api");
    Ok(StatusCode::NO_CONTENT)
}
