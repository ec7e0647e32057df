use axum::response::{IntoResponse, Response};

use super::AppError;

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    AppError::NotFound("Not Found".to_string()).into_response()
}
