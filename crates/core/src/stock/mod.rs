//! Stock ledger.
//!
//! Owns the rule that an item's on-hand quantity never drops below zero.
//! Every change to `Item.quantity` is expressed as a signed [`StockMovement`]
//! and checked here before the persistence layer writes it.

pub mod ledger;

#[cfg(test)]
mod ledger_props;

pub use ledger::{StockLedger, StockMovement};
