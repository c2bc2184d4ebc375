//! Customer and supplier routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection, QueryRejection}},
    http::StatusCode,
    routing::get,
};
use stockbook_core::catalog::{Customer, PartyDetails, Supplier};
use stockbook_db::{CustomerRepository, SupplierRepository};
use stockbook_shared::types::{CustomerId, PageResponse, SupplierId};
use tracing::info;

use super::PageQuery;
use crate::{
    AppState,
    authz::{Action, authorize},
    error::ApiResult,
    middleware::AuthPrincipal,
};

/// Creates the customer and supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{customer_id}", get(get_customer).delete(delete_customer))
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route("/suppliers/{supplier_id}", get(get_supplier).delete(delete_supplier))
}

fn customers(state: &AppState) -> CustomerRepository {
    CustomerRepository::new(state.conn()).with_max_attempts(state.inventory.max_attempts)
}

fn suppliers(state: &AppState) -> SupplierRepository {
    SupplierRepository::new(state.conn()).with_max_attempts(state.inventory.max_attempts)
}

// ========== Customers ==========

/// GET `/customers`
async fn list_customers(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<PageResponse<Customer>>> {
    authorize(&principal, Action::View)?;
    let Query(query) = query?;

    Ok(Json(customers(&state).list_customers(query.page_request()).await?))
}

/// POST `/customers`
async fn create_customer(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    payload: Result<Json<PartyDetails>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    authorize(&principal, Action::CreateParty)?;
    let Json(details) = payload?;

    let customer = customers(&state).create_customer(details).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET `/customers/{customer_id}`
async fn get_customer(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    customer_id: Result<Path<CustomerId>, PathRejection>,
) -> ApiResult<Json<Customer>> {
    authorize(&principal, Action::View)?;
    let Path(customer_id) = customer_id?;

    Ok(Json(customers(&state).get_customer(customer_id).await?))
}

/// DELETE `/customers/{customer_id}`
async fn delete_customer(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    customer_id: Result<Path<CustomerId>, PathRejection>,
) -> ApiResult<StatusCode> {
    authorize(&principal, Action::DeleteCatalogRecord)?;
    let Path(customer_id) = customer_id?;

    customers(&state).delete_customer(customer_id).await?;
    info!(%customer_id, user_id = %principal.user_id, "customer deleted via api");
    Ok(StatusCode::NO_CONTENT)
}

// ========== Suppliers ==========

/// GET `/suppliers`
async fn list_suppliers(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<PageResponse<Supplier>>> {
    authorize(&principal, Action::View)?;
    let Query(query) = query?;

    Ok(Json(suppliers(&state).list_suppliers(query.page_request()).await?))
}

/// POST `/suppliers`
async fn create_supplier(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    payload: Result<Json<PartyDetails>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    authorize(&principal, Action::CreateParty)?;
    let Json(details) = payload?;

    let supplier = suppliers(&state).create_supplier(details).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// GET `/suppliers/{supplier_id}`
async fn get_supplier(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    supplier_id: Result<Path<SupplierId>, PathRejection>,
) -> ApiResult<Json<Supplier>> {
    authorize(&principal, Action::View)?;
    let Path(supplier_id) = supplier_id?;

    Ok(Json(suppliers(&state).get_supplier(supplier_id).await?))
}

/// DELETE `/suppliers/{supplier_id}`
async fn delete_supplier(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    supplier_id: Result<Path<SupplierId>, PathRejection>,
) -> ApiResult<StatusCode> {
    authorize(&principal, Action::DeleteCatalogRecord)?;
    let Path(supplier_id) = supplier_id?;

    suppliers(&state).delete_supplier(supplier_id).await?;
    info!(%supplier_id, user_id = %principal.user_id, "supplier deleted via api");
    Ok(StatusCode::NO_CONTENT)
}
