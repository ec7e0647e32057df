//! Product Service - Business logic layer

use observability::products::ProductMetrics;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Caller, CreateProduct, ProductPage, ProductResponse, SearchProduct, UpdateProduct};
use crate::query::{ProductFilter, SearchPlan};
use crate::repository::ProductRepository;
use crate::validation::{self, validate, validate_id};

/// Reply body of a successful removal
pub const REMOVED: &str = "OK";

/// Product service providing the five caller-scoped operations.
///
/// Every operation takes raw JSON input, runs it through the matching rule
/// table and only then touches the repository. Nothing outside the caller's
/// own products is ever read or written.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a product owned by the caller
    #[instrument(skip(self, input), fields(username = %caller.username()))]
    pub async fn create(&self, caller: &Caller, input: Value) -> ProductResult<ProductResponse> {
        observed("create", self.create_owned(caller, input)).await
    }

    /// Fetch one of the caller's products by id
    #[instrument(skip(self, id), fields(username = %caller.username()))]
    pub async fn get(&self, caller: &Caller, id: Value) -> ProductResult<ProductResponse> {
        observed("get", self.get_owned(caller, id)).await
    }

    /// Overwrite every mutable field of one of the caller's products
    #[instrument(skip(self, input), fields(username = %caller.username()))]
    pub async fn update(&self, caller: &Caller, input: Value) -> ProductResult<ProductResponse> {
        observed("update", self.update_owned(caller, input)).await
    }

    /// Delete one of the caller's products
    #[instrument(skip(self, id), fields(username = %caller.username()))]
    pub async fn remove(&self, caller: &Caller, id: Value) -> ProductResult<&'static str> {
        observed("remove", self.remove_owned(caller, id)).await
    }

    /// Filtered, paginated listing of the caller's products
    #[instrument(skip(self, input), fields(username = %caller.username()))]
    pub async fn search(&self, caller: &Caller, input: Value) -> ProductResult<ProductPage> {
        observed("search", self.search_owned(caller, input)).await
    }

    async fn create_owned(&self, caller: &Caller, input: Value) -> ProductResult<ProductResponse> {
        let fields: CreateProduct = normalized(validate(&validation::CREATE, &input)?)?;
        let product = self.repository.create(caller.username(), fields).await?;
        Ok(product.into())
    }

    async fn get_owned(&self, caller: &Caller, id: Value) -> ProductResult<ProductResponse> {
        let id = validate_id(&id)?;
        self.repository
            .find_one(&ProductFilter::owned_product(caller, id))
            .await?
            .map(Into::into)
            .ok_or(ProductError::NotFound(id))
    }

    async fn update_owned(&self, caller: &Caller, input: Value) -> ProductResult<ProductResponse> {
        let UpdateProduct { id, fields } = normalized(validate(&validation::UPDATE, &input)?)?;
        let filter = ProductFilter::owned_product(caller, id);

        if self.repository.count(&filter).await? != 1 {
            return Err(ProductError::NotFound(id));
        }

        // The row can vanish between the count and the write
        self.repository
            .update(&filter, fields)
            .await?
            .map(Into::into)
            .ok_or(ProductError::NotFound(id))
    }

    async fn remove_owned(&self, caller: &Caller, id: Value) -> ProductResult<&'static str> {
        let id = validate_id(&id)?;
        let filter = ProductFilter::owned_product(caller, id);

        if self.repository.count(&filter).await? != 1 {
            return Err(ProductError::NotFound(id));
        }

        match self.repository.delete(&filter).await? {
            0 => Err(ProductError::NotFound(id)),
            _ => Ok(REMOVED),
        }
    }

    async fn search_owned(&self, caller: &Caller, input: Value) -> ProductResult<ProductPage> {
        let request: SearchProduct = normalized(validate(&validation::SEARCH, &input)?)?;
        let plan = SearchPlan::build(caller, &request);

        let products = self.repository.find_many(&plan.filter, plan.window).await?;
        let total_item = self.repository.count(&plan.filter).await?;

        ProductMetrics::record_search_page(products.len());
        tracing::debug!(
            returned = products.len(),
            total_item,
            page = plan.page,
            "Search completed"
        );

        Ok(ProductPage {
            data: products.into_iter().map(Into::into).collect(),
            paging: plan.paging(total_item),
        })
    }
}

/// Deserialize a rule-checked object into its typed form.
fn normalized<T: DeserializeOwned>(object: Map<String, Value>) -> ProductResult<T> {
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ProductError::Internal(format!("normalized input did not deserialize: {e}")))
}

async fn observed<T>(
    operation: &'static str,
    work: impl Future<Output = ProductResult<T>>,
) -> ProductResult<T> {
    let started = Instant::now();
    let result = work.await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(ProductError::Validation(_)) => "invalid",
        Err(ProductError::NotFound(_)) => "not_found",
        Err(ProductError::Database(_) | ProductError::Internal(_)) => "error",
    };
    ProductMetrics::record_operation(operation, outcome, started.elapsed().as_secs_f64());

    if let Err(ProductError::Database(msg) | ProductError::Internal(msg)) = &result {
        tracing::error!(operation, error = %msg, "Product operation failed");
    }

    result
}
