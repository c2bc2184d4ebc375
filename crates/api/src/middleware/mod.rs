//! Request middleware and extractors.

pub mod principal;

pub use principal::{AuthPrincipal, USER_ID_HEADER, USER_ROLE_HEADER};
