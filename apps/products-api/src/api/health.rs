//! Health check endpoints

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_helpers::{HealthCheckFuture, health_router, run_health_checks};
use database::postgres::check_health;
use observability::metrics_handler;
use serde_json::Value;

use crate::state::AppState;

/// Readiness: 200 while the database answers, 503 otherwise.
async fn ready(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let checks: Vec<(&str, HealthCheckFuture)> = vec![(
        "database",
        Box::pin(async { check_health(&state.db).await.map_err(|e| e.to_string()) }),
    )];

    run_health_checks(checks).await
}

/// `/health`, `/ready` and `/metrics`, served outside `/api`
pub fn router(state: AppState) -> Router {
    let app_info = state.config.app;

    Router::new()
        .route("/ready", get(ready))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .merge(health_router(app_info))
}
