//! Invoice batch planning.

use std::collections::HashSet;

use stockbook_shared::types::{Money, OrderId};

use crate::error::InventoryError;
use crate::invoice::types::{
    CreateInvoice, InvoiceCandidate, InvoiceLine, InvoiceResult, SkipReason, SkippedOrder,
};

/// Stateless invoice planner.
pub struct InvoiceBatcher;

impl InvoiceBatcher {
    /// Collapse repeated ids, keeping the first occurrence of each.
    #[must_use]
    pub fn dedupe(order_ids: &[OrderId]) -> Vec<OrderId> {
        let mut seen = HashSet::with_capacity(order_ids.len());
        order_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Price the requested orders and decide which ones the invoice includes.
    ///
    /// Orders that `lookup` cannot find are skipped as `NotFound`; orders
    /// already invoiced are skipped as `AlreadyInvoiced`. An invoice where
    /// every order is skipped is still a valid, empty result.
    ///
    /// # Errors
    ///
    /// - `EmptyInvoice` if no order ids were given
    /// - `InvalidInput` if the reference is blank or the grand total overflows
    /// - `InvalidPrice` if a line total overflows
    pub fn plan<F>(cmd: &CreateInvoice, lookup: F) -> Result<InvoiceResult, InventoryError>
    where
        F: Fn(OrderId) -> Option<InvoiceCandidate>,
    {
        if cmd.order_ids.is_empty() {
            return Err(InventoryError::EmptyInvoice);
        }
        let reference = cmd.reference.trim();
        if reference.is_empty() {
            return Err(InventoryError::InvalidInput(
                "invoice reference cannot be empty".to_string(),
            ));
        }

        let mut lines = Vec::new();
        let mut skipped = Vec::new();

        for order_id in Self::dedupe(&cmd.order_ids) {
            let Some(candidate) = lookup(order_id) else {
                skipped.push(SkippedOrder {
                    order_id,
                    reason: SkipReason::NotFound,
                });
                continue;
            };

            if candidate.order.invoiced {
                skipped.push(SkippedOrder {
                    order_id,
                    reason: SkipReason::AlreadyInvoiced,
                });
                continue;
            }

            let quantity = candidate.order.quantity;
            let line_total = candidate
                .unit_price
                .checked_times(i64::from(quantity))
                .ok_or(InventoryError::InvalidPrice(candidate.unit_price.amount()))?;
            lines.push(InvoiceLine {
                order_id,
                item_id: candidate.order.item_id,
                item_name: candidate.item_name,
                quantity,
                unit_price: candidate.unit_price,
                line_total,
            });
        }

        let grand_total = Money::checked_sum(lines.iter().map(|line| line.line_total)).ok_or_else(
            || InventoryError::InvalidInput("invoice total is out of range".to_string()),
        )?;

        Ok(InvoiceResult {
            reference: reference.to_string(),
            date: cmd.date,
            billed_to: cmd.billed_to.trim().to_string(),
            lines,
            grand_total,
            skipped,
        })
    }
}
