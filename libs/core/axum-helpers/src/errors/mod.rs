pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error envelope returned by every failing endpoint.
///
/// `errors` is either a plain message or, for validation failures, a list of
/// [`FieldError`]s:
///
/// ```json
/// { "errors": "Product is not found" }
/// { "errors": [{ "field": "name", "code": "required", "message": "\"name\" is required" }] }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(value_type = Object)]
    pub errors: serde_json::Value,
}

/// One violated rule on one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Flatten `validator` errors into a list ordered by field name.
///
/// Errors on the same field keep the order they were recorded in.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldError {
                field: field.to_string(),
                code: err.code.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("\"{field}\" is invalid")),
            })
        })
        .collect()
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates convert their own error enums into this one; the
/// `IntoResponse` impl picks the status, the log level and the envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::QueryExtractorRejection(e) => e.status(),
            AppError::PathExtractorRejection(e) => e.status(),
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let errors = match self {
            AppError::Validation(e) => {
                let fields = field_errors(&e);
                tracing::info!(fields = fields.len(), "Validation failed");
                serde_json::to_value(fields).unwrap_or(serde_json::Value::Null)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                e.body_text().into()
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!("Query extraction error: {:?}", e);
                e.body_text().into()
            }
            AppError::PathExtractorRejection(e) => {
                tracing::warn!("Path extraction error: {:?}", e);
                e.body_text().into()
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                msg.into()
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                msg.into()
            }
            AppError::InternalServerError(msg) => {
                // Detail stays in the log; clients get a generic message
                tracing::error!("Internal server error: {}", msg);
                "Internal server error".into()
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}
