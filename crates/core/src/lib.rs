//! Core business logic for Stockbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here; the `db`
//! crate runs the resulting plans inside database transactions.
//!
//! # Modules
//!
//! - `stock` - Stock ledger rules (quantity never negative)
//! - `lifecycle` - Order and purchase commands
//! - `invoice` - Invoice batching and totals
//! - `catalog` - Items, customers and suppliers
//! - `reports` - Inventory report figures
//! - `error` - Error taxonomy shared by all of the above

pub mod catalog;
pub mod error;
pub mod invoice;
pub mod lifecycle;
pub mod reports;
pub mod stock;

pub use error::{EntityKind, InventoryError};
