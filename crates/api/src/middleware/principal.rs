//! Principal extraction.
//!
//! Authentication happens in the gateway in front of this service. It forwards
//! the caller as two headers, which are parsed here into a [`Principal`].

use axum::{extract::FromRequestParts, http::request::Parts};
use stockbook_shared::{AppError, Principal, Role, types::UserId};

use crate::error::ApiError;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the acting user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the acting principal.
///
/// ```ignore
/// async fn handler(AuthPrincipal(principal): AuthPrincipal) -> impl IntoResponse {
///     authorize(&principal, Action::RecordPurchase)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal(pub Principal);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("missing {USER_ID_HEADER} header")))?
            .parse::<UserId>()
            .map_err(|_| AppError::Unauthorized(format!("malformed {USER_ID_HEADER} header")))?;

        let role = header(parts, USER_ROLE_HEADER)
            .ok_or_else(|| AppError::Unauthorized(format!("missing {USER_ROLE_HEADER} header")))?;
        let role = Role::parse(role)
            .ok_or_else(|| AppError::Unauthorized(format!("unknown role '{role}'")))?;

        Ok(Self(Principal::new(user_id, role)))
    }
}
