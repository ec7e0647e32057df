//! Products API routes

use axum::{Router, middleware};
use axum_helpers::{SharedTokenResolver, token_auth_middleware};
use domain_products::{PgProductRepository, ProductService, handlers};
use observability::metrics_middleware;
use std::sync::Arc;

use crate::auth::UserTokenResolver;
use crate::state::AppState;

/// Create products router, authenticated against the `users` table
pub fn router(state: &AppState) -> Router {
    let resolver: SharedTokenResolver = Arc::new(UserTokenResolver::new(state.db.clone()));
    let service = ProductService::new(PgProductRepository::new(state.db.clone()));

    with_auth(handlers::router(service), resolver)
}

/// Token check in front of every route; metrics recorded per matched route.
pub fn with_auth(router: Router, resolver: SharedTokenResolver) -> Router {
    router
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn_with_state(resolver, token_auth_middleware))
}
