//! `SeaORM` entity definitions.

pub mod prelude;

pub mod customers;
pub mod items;
pub mod orders;
pub mod purchases;
pub mod suppliers;
