//! Invoice batching.
//!
//! Freezes a set of un-invoiced orders into one invoice, computing line and
//! grand totals in fixed-point money. Orders that cannot be included are
//! reported back with a reason instead of being dropped.

pub mod batcher;
pub mod types;

#[cfg(test)]
mod batcher_props;

pub use batcher::InvoiceBatcher;
pub use types::{
    CreateInvoice, InvoiceCandidate, InvoiceLine, InvoiceResult, SkipReason, SkippedOrder,
};
