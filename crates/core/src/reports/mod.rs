//! Inventory report figures.
//!
//! Pure aggregation over loaded items, orders and purchases:
//! - Record counts
//! - Stock value, sales and purchase totals
//! - Low-stock list
//! - Most recent orders and purchases

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
