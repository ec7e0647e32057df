use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejection is an [`AppError`].
///
/// Defaults to an untyped `serde_json::Value` so the domain layer can run its
/// own rule tables over the raw input.
///
/// ```ignore
/// async fn create(JsonBody(body): JsonBody) -> Result<Json<Value>, AppError> {
///     // body: serde_json::Value
/// }
/// ```
pub struct JsonBody<T = serde_json::Value>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
