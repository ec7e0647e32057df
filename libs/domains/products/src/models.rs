use axum_helpers::AuthenticatedUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Identity every product operation is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    username: String,
}

impl Caller {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl From<AuthenticatedUser> for Caller {
    fn from(user: AuthenticatedUser) -> Self {
        Self::new(user.username)
    }
}

/// Stored product, including its owner
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    /// Owner; fixed at creation
    pub username: String,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: i64, owner: &str, fields: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: owner.to_string(),
            name: fields.name,
            price: fields.price,
            stock: fields.stock,
            description: fields.description,
            category: fields.category,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field; id and owner are untouched.
    pub fn apply(&mut self, fields: CreateProduct) {
        self.name = fields.name;
        self.price = fields.price;
        self.stock = fields.stock;
        self.description = fields.description;
        self.category = fields.category;
        self.image_url = fields.image_url;
        self.updated_at = Utc::now();
    }
}

/// Product as returned to clients (owner and timestamps omitted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Coffee grinder")]
    pub name: String,
    #[schema(example = 49.9)]
    pub price: f64,
    #[schema(example = 12)]
    pub stock: i32,
    pub description: Option<String>,
    #[schema(example = "kitchen")]
    pub category: String,
    #[schema(example = "https://cdn.example.com/grinder.png")]
    pub image_url: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            description: product.description,
            category: product.category,
            image_url: product.image_url,
        }
    }
}

/// Validated create input. Also the full set of fields an update writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    /// At most 100 characters
    pub name: String,
    pub price: f64,
    pub stock: i32,
    /// At most 100 characters
    #[serde(default)]
    pub description: Option<String>,
    /// At most 100 characters
    pub category: String,
    /// At most 1000 characters
    pub image_url: String,
}

/// Validated update input; `id` comes from the path
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub id: i64,
    #[serde(flatten)]
    pub fields: CreateProduct,
}

/// Normalized search request (defaults applied)
#[derive(Debug, Clone, PartialEq, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchProduct {
    /// 1-based page number (default 1)
    pub page: u64,
    /// Page size, 1 to 100 (default 10)
    pub size: u64,
    /// Substring of the name
    #[serde(default)]
    pub name: Option<String>,
    /// Exact price
    #[serde(default)]
    pub price: Option<f64>,
    /// Exact stock
    #[serde(default)]
    pub stock: Option<i32>,
    /// Substring of the description
    #[serde(default)]
    pub description: Option<String>,
    /// Substring of the category
    #[serde(default)]
    pub category: Option<String>,
    /// Substring of the image URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Default for SearchProduct {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            name: None,
            price: None,
            stock: None,
            description: None,
            category: None,
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Paging {
    pub page: u64,
    pub total_item: u64,
    pub total_page: u64,
}

impl Paging {
    /// `size` is a validated page size, never zero.
    pub fn new(page: u64, size: u64, total_item: u64) -> Self {
        Self {
            page,
            total_item,
            total_page: total_item.div_ceil(size),
        }
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub data: Vec<ProductResponse>,
    pub paging: Paging,
}

/// `{"data": product}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    pub data: ProductResponse,
}

/// `{"data": "OK"}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemovedEnvelope {
    #[schema(example = "OK")]
    pub data: String,
}
