use crate::errors::AppError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Path extractor whose rejection is an [`AppError`].
///
/// Defaults to a raw `String` segment; the domain layer decides whether it
/// is a valid id.
///
/// ```ignore
/// async fn get(PathParam(id): PathParam) -> Result<Json<Value>, AppError> {
///     // id: String
/// }
/// ```
pub struct PathParam<T = String>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(PathParam(value))
    }
}
