//! Invoice routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use stockbook_core::invoice::{CreateInvoice, InvoiceResult};
use stockbook_db::InvoiceRepository;
use tracing::info;

use crate::{
    AppState,
    authz::{Action, authorize},
    error::ApiResult,
    middleware::AuthPrincipal,
};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/invoices", post(create_invoice))
}

/// POST `/invoices` - Freeze a batch of orders into an invoice.
///
/// Returns 201 with the priced lines. Orders that could not be included are
/// listed under `skipped`; a request where every order is skipped still
/// returns 201 with no lines.
async fn create_invoice(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    payload: Result<Json<CreateInvoice>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<InvoiceResult>)> {
    authorize(&principal, Action::CreateInvoice)?;
    let Json(cmd) = payload?;

    let result = InvoiceRepository::new(state.conn())
        .with_max_attempts(state.inventory.max_attempts)
        .create_invoice(cmd)
        .await?;
    info!(
        reference = %result.reference,
        user_id = %principal.user_id,
        "invoice issued via api"
    );
    Ok((StatusCode::CREATED, Json(result)))
}
