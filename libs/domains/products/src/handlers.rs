//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use axum_helpers::{
    CurrentUser, JsonBody, PathParam, QueryParams,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    Caller, CreateProduct, Paging, ProductEnvelope, ProductPage, ProductResponse,
    RemovedEnvelope, SearchProduct,
};
use crate::repository::ProductRepository;
use crate::service::{ProductService, REMOVED};

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        search_products,
        create_product,
        get_product,
        update_product,
        remove_product,
    ),
    components(
        schemas(
            ProductResponse, CreateProduct, SearchProduct, Paging,
            ProductEnvelope, ProductPage, RemovedEnvelope
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Products owned by the authenticated user")
    )
)]
pub struct ApiDoc;

type SharedService<R> = Arc<ProductService<R>>;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(search_products).post(create_product))
        .route(
            "/{productId}",
            get(get_product).put(update_product).delete(remove_product),
        )
        .with_state(shared_service)
}

/// Search the caller's products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(SearchProduct),
    responses(
        (status = 200, description = "One page of matching products", body = ProductPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    CurrentUser(user): CurrentUser,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> ProductResult<Json<ProductPage>> {
    // Every query value arrives as a string; the rule table coerces numbers
    let input: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    let page = service.search(&Caller::from(user), Value::Object(input)).await?;
    Ok(Json(page))
}

/// Create a product owned by the caller
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = ProductEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody,
) -> ProductResult<Json<ProductEnvelope>> {
    let data = service.create(&Caller::from(user), body).await?;
    Ok(Json(ProductEnvelope { data }))
}

/// Get one of the caller's products
#[utoipa::path(
    get,
    path = "/{productId}",
    tag = "Products",
    params(
        ("productId" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    CurrentUser(user): CurrentUser,
    PathParam(product_id): PathParam,
) -> ProductResult<Json<ProductEnvelope>> {
    let data = service
        .get(&Caller::from(user), Value::String(product_id))
        .await?;
    Ok(Json(ProductEnvelope { data }))
}

/// Replace the fields of one of the caller's products
#[utoipa::path(
    put,
    path = "/{productId}",
    tag = "Products",
    params(
        ("productId" = i64, Path, description = "Product ID")
    ),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product updated", body = ProductEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    CurrentUser(user): CurrentUser,
    PathParam(product_id): PathParam,
    JsonBody(body): JsonBody,
) -> ProductResult<Json<ProductEnvelope>> {
    let data = service
        .update(&Caller::from(user), with_path_id(body, product_id))
        .await?;
    Ok(Json(ProductEnvelope { data }))
}

/// Delete one of the caller's products
#[utoipa::path(
    delete,
    path = "/{productId}",
    tag = "Products",
    params(
        ("productId" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product removed", body = RemovedEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_product<R: ProductRepository>(
    State(service): State<SharedService<R>>,
    CurrentUser(user): CurrentUser,
    PathParam(product_id): PathParam,
) -> ProductResult<Json<RemovedEnvelope>> {
    service
        .remove(&Caller::from(user), Value::String(product_id))
        .await?;
    Ok(Json(RemovedEnvelope {
        data: REMOVED.to_string(),
    }))
}

/// The path id wins over any `id` in the body. Non-object bodies are left for
/// validation to reject.
fn with_path_id(body: Value, product_id: String) -> Value {
    match body {
        Value::Object(mut fields) => {
            fields.insert("id".to_string(), Value::String(product_id));
            Value::Object(fields)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_id_overrides_body() {
        let merged = with_path_id(json!({ "id": 1, "name": "x" }), "7".into());
        assert_eq!(merged, json!({ "id": "7", "name": "x" }));
    }

    #[test]
    fn test_non_object_body_untouched() {
        assert_eq!(with_path_id(json!([1, 2]), "7".into()), json!([1, 2]));
    }

    #[test]
    fn test_api_doc_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"".to_string()), "{paths:?}");
        assert!(paths.contains(&"/{productId}".to_string()), "{paths:?}");
    }
}
