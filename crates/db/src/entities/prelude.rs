//! Entity re-exports.

pub use super::customers::Entity as Customers;
pub use super::items::Entity as Items;
pub use super::orders::Entity as Orders;
pub use super::purchases::Entity as Purchases;
pub use super::suppliers::Entity as Suppliers;
