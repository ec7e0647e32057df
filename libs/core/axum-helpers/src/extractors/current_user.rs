use crate::auth::AuthenticatedUser;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// The caller resolved by [`token_auth_middleware`](crate::auth::token_auth_middleware).
///
/// Rejects with 401 when the route is not behind the auth middleware.
pub struct CurrentUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }
}
