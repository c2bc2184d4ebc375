//! Shared types, errors, and configuration for Stockbook.
//!
//! This crate provides common types used across all other crates:
//! - Money type with fixed two-digit decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - The acting principal handed over by the upstream gateway
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod principal;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use principal::{Principal, Role};
