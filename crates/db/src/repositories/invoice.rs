//! Invoice repository.
//!
//! Marks a batch of orders invoiced. Never touches item quantities.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};
use stockbook_core::invoice::{CreateInvoice, InvoiceBatcher, InvoiceCandidate, InvoiceResult};
use stockbook_core::lifecycle::Order;
use stockbook_core::InventoryError;
use stockbook_shared::types::{Money, OrderId};
use tracing::info;
use uuid::Uuid;

use crate::entities::{items, orders};
use crate::error::RepositoryError;
use crate::unit_of_work::{finish, with_retry, DEFAULT_MAX_ATTEMPTS};

/// Invoice repository.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    db: DatabaseConnection,
    max_attempts: u32,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of attempts for transient failures.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Invoices the requested orders.
    ///
    /// Missing and already-invoiced orders are reported in
    /// [`InvoiceResult::skipped`]. Re-running the same request invoices
    /// nothing further.
    ///
    /// # Errors
    ///
    /// - `EmptyInvoice` if no order ids were given
    /// - `InvalidInput` if the reference is blank
    pub async fn create_invoice(&self, cmd: CreateInvoice) -> Result<InvoiceResult, InventoryError> {
        if cmd.order_ids.is_empty() {
            return Err(InventoryError::EmptyInvoice);
        }

        let cmd = &cmd;
        let result = with_retry("create_invoice", self.max_attempts, move || async move {
            let txn = self.db.begin().await?;
            let result = create_invoice_in(&txn, cmd).await;
            finish(txn, result).await
        })
        .await?;

        info!(
            reference = %result.reference,
            invoiced = result.lines.len(),
            skipped = result.skipped.len(),
            grand_total = %result.grand_total,
            "invoice created"
        );
        Ok(result)
    }
}

async fn create_invoice_in<C>(conn: &C, cmd: &CreateInvoice) -> Result<InvoiceResult, RepositoryError>
where
    C: ConnectionTrait,
{
    let result = plan_invoice_in(conn, cmd).await?;
    mark_invoiced_in(conn, &result).await?;
    Ok(result)
}

/// Reads the requested orders and prices them. Writes nothing.
pub(crate) async fn plan_invoice_in<C>(
    conn: &C,
    cmd: &CreateInvoice,
) -> Result<InvoiceResult, RepositoryError>
where
    C: ConnectionTrait,
{
    let requested: Vec<Uuid> = InvoiceBatcher::dedupe(&cmd.order_ids)
        .into_iter()
        .map(OrderId::into_inner)
        .collect();

    let order_rows = orders::Entity::find()
        .filter(orders::Column::Id.is_in(requested))
        .all(conn)
        .await?;

    let item_ids: Vec<Uuid> = order_rows.iter().map(|o| o.item_id).collect();
    let item_rows: HashMap<Uuid, items::Model> = items::Entity::find()
        .filter(items::Column::Id.is_in(item_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    let candidates: HashMap<OrderId, InvoiceCandidate> = order_rows
        .into_iter()
        .filter_map(|row| {
            let item = item_rows.get(&row.item_id)?;
            let order = Order::from(row);
            Some((
                order.id,
                InvoiceCandidate {
                    order,
                    item_name: item.name.clone(),
                    unit_price: Money::new(item.price),
                },
            ))
        })
        .collect();

    Ok(InvoiceBatcher::plan(cmd, |id| candidates.get(&id).cloned())?)
}

/// Flags every order in `result` as invoiced.
///
/// Fails with a retryable conflict unless every planned order was still
/// uninvoiced, so a plan built from a stale read never half-applies.
pub(crate) async fn mark_invoiced_in<C>(conn: &C, result: &InvoiceResult) -> Result<(), RepositoryError>
where
    C: ConnectionTrait,
{
    if result.is_empty() {
        return Ok(());
    }

    let included: Vec<Uuid> = result
        .invoiced_order_ids()
        .into_iter()
        .map(OrderId::into_inner)
        .collect();
    let planned = included.len() as u64;

    let updated = orders::Entity::update_many()
        .col_expr(orders::Column::Invoiced, Expr::value(true))
        .filter(orders::Column::Id.is_in(included))
        .filter(orders::Column::Invoiced.eq(false))
        .exec(conn)
        .await?;

    if updated.rows_affected != planned {
        return Err(InventoryError::conflict(format!(
            "invoice {}: {} of {planned} orders changed concurrently",
            result.reference,
            planned - updated.rows_affected.min(planned)
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
#[path = "invoice_tests.rs"]
mod tests;
