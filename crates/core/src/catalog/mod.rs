//! Catalog master data: items, customers and suppliers.
//!
//! - `item` - Stock-keeping items and their validation
//! - `party` - Customers and suppliers
//! - `policy` - Delete policy for referenced records

pub mod item;
pub mod party;
pub mod policy;

pub use item::{Item, NewItem};
pub use party::{Customer, PartyDetails, Supplier};
pub use policy::ensure_unreferenced;
