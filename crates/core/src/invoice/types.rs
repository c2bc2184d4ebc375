//! Invoice commands and results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ItemId, Money, OrderId};

use crate::lifecycle::Order;

/// Command to invoice a batch of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoice {
    /// Orders to include, in presentation order. Duplicates are ignored.
    pub order_ids: Vec<OrderId>,
    /// Invoice number.
    pub reference: String,
    /// Invoice date.
    pub date: NaiveDate,
    /// Name the invoice is addressed to.
    #[serde(default)]
    pub billed_to: String,
}

/// An order together with the item data needed to price it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceCandidate {
    /// The stored order.
    pub order: Order,
    /// Name of the ordered item.
    pub item_name: String,
    /// Current unit price of the ordered item.
    pub unit_price: Money,
}

/// One priced order on an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// The invoiced order.
    pub order_id: OrderId,
    /// The ordered item.
    pub item_id: ItemId,
    /// Item name for rendering.
    pub item_name: String,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price at invoicing time.
    pub unit_price: Money,
    /// `quantity * unit_price`.
    pub line_total: Money,
}

/// Why a requested order was left off the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No order with that id exists.
    NotFound,
    /// The order is already part of an invoice.
    AlreadyInvoiced,
}

impl SkipReason {
    /// Returns the string representation of the reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyInvoiced => "already_invoiced",
        }
    }
}

/// A requested order that was not invoiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOrder {
    /// The requested id.
    pub order_id: OrderId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// A computed invoice, ready for an external renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    /// Invoice number.
    pub reference: String,
    /// Invoice date.
    pub date: NaiveDate,
    /// Name the invoice is addressed to.
    pub billed_to: String,
    /// Priced orders, in request order.
    pub lines: Vec<InvoiceLine>,
    /// Sum of all line totals.
    pub grand_total: Money,
    /// Requested orders that were left off.
    pub skipped: Vec<SkippedOrder>,
}

impl InvoiceResult {
    /// Ids of the orders this invoice marks as invoiced.
    #[must_use]
    pub fn invoiced_order_ids(&self) -> Vec<OrderId> {
        self.lines.iter().map(|line| line.order_id).collect()
    }

    /// Returns true if no order was included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
