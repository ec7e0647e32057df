//! Token authentication.
//!
//! Clients send an opaque token in the `Authorization` header. A
//! [`TokenResolver`] maps it to the owning user; the middleware stores the
//! result in request extensions for the [`CurrentUser`](crate::CurrentUser)
//! extractor.
//!
//! ```ignore
//! use axum_helpers::auth::{SharedTokenResolver, token_auth_middleware};
//!
//! let resolver: SharedTokenResolver = Arc::new(UserTokenResolver::new(db));
//! let protected = Router::new()
//!     .route("/products", post(create))
//!     .layer(axum::middleware::from_fn_with_state(resolver, token_auth_middleware));
//! ```

pub mod middleware;

pub use middleware::{
    AuthenticatedUser, SharedTokenResolver, StaticTokenResolver, TokenResolver,
    token_auth_middleware,
};
