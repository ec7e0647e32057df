use crate::errors::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl AuthenticatedUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Looks up the user owning an access token.
///
/// `Ok(None)` means the token is unknown; `Err` is reserved for backend
/// failures and surfaces as a 500.
#[async_trait]
pub trait TokenResolver: Send + Sync + 'static {
    async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>, AppError>;
}

pub type SharedTokenResolver = Arc<dyn TokenResolver>;

/// Fixed token table, for tests and local runs without a user store.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, String>,
}

impl StaticTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, username: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), username.into());
        self
    }
}

#[async_trait]
impl TokenResolver for StaticTokenResolver {
    async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        Ok(self.tokens.get(token).map(AuthenticatedUser::new))
    }
}

fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Reject requests whose `Authorization` token does not resolve to a user.
///
/// On success the [`AuthenticatedUser`] is inserted into request extensions.
pub async fn token_auth_middleware(
    State(resolver): State<SharedTokenResolver>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(request.headers()) else {
        tracing::debug!("No token in Authorization header");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    };

    let Some(user) = resolver.resolve(token).await? else {
        tracing::debug!("Token did not resolve to a user");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    };

    tracing::debug!(username = %user.username, "Request authenticated");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
