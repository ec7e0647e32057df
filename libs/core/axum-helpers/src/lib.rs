//! # Axum Helpers
//!
//! Shared web plumbing for the service binaries.
//!
//! ## Modules
//!
//! - **[`auth`]**: token authentication middleware and the resolver seam
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the `{"errors": ...}` envelope
//! - **[`extractors`]**: JSON body, path, query and current-user extractors
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(api_routes)?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    AuthenticatedUser, SharedTokenResolver, StaticTokenResolver, TokenResolver,
    token_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorResponse, FieldError, field_errors};

pub use extractors::{CurrentUser, JsonBody, PathParam, QueryParams};
