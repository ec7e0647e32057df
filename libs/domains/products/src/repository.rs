use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};
use crate::query::{PageWindow, ProductFilter};

/// Ownership-scoped product persistence.
///
/// Every read and write goes through a [`ProductFilter`], which always
/// carries the owner predicate. Listing order is ascending id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product for `owner`; the repository assigns the id
    async fn create(&self, owner: &str, fields: CreateProduct) -> ProductResult<Product>;

    async fn find_one(&self, filter: &ProductFilter) -> ProductResult<Option<Product>>;

    async fn find_many(
        &self,
        filter: &ProductFilter,
        window: PageWindow,
    ) -> ProductResult<Vec<Product>>;

    /// Matches regardless of any page window
    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64>;

    /// Overwrite the mutable fields of matching products.
    ///
    /// Returns the updated product, or `None` when nothing matched.
    async fn update(
        &self,
        filter: &ProductFilter,
        fields: CreateProduct,
    ) -> ProductResult<Option<Product>>;

    /// Returns the number of rows removed
    async fn delete(&self, filter: &ProductFilter) -> ProductResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, owner: &str, fields: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let product = Product::new(store.last_id, owner, fields);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn find_one(&self, filter: &ProductFilter) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().find(|p| filter.matches(p)).cloned())
    }

    async fn find_many(
        &self,
        filter: &ProductFilter,
        window: PageWindow,
    ) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;

        // BTreeMap iterates in id order
        let page = store
            .products
            .values()
            .filter(|p| filter.matches(p))
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(page)
    }

    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let store = self.store.read().await;
        Ok(store.products.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn update(
        &self,
        filter: &ProductFilter,
        fields: CreateProduct,
    ) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;

        let mut updated = None;
        for product in store.products.values_mut().filter(|p| filter.matches(p)) {
            product.apply(fields.clone());
            updated.get_or_insert_with(|| product.clone());
        }

        if let Some(product) = &updated {
            tracing::info!(product_id = product.id, "Updated product");
        }
        Ok(updated)
    }

    async fn delete(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let mut store = self.store.write().await;

        let before = store.products.len();
        store.products.retain(|_, p| !filter.matches(p));
        let removed = (before - store.products.len()) as u64;

        if removed > 0 {
            tracing::info!(removed, "Deleted products");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Caller;
    use crate::query::Predicate;

    fn fields(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: 100.0,
            stock: 100,
            description: Some("test".to_string()),
            category: "test".to_string(),
            image_url: "https://img/test.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create("alice", fields("a")).await.unwrap();
        let second = repo.create("bob", fields("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.username, "bob");
    }

    #[tokio::test]
    async fn test_find_one_respects_owner() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create("alice", fields("a")).await.unwrap();

        let alice = Caller::new("alice");
        let bob = Caller::new("bob");

        let found = repo
            .find_one(&ProductFilter::owned_product(&alice, product.id))
            .await
            .unwrap();
        assert_eq!(found, Some(product.clone()));

        let hidden = repo
            .find_one(&ProductFilter::owned_product(&bob, product.id))
            .await
            .unwrap();
        assert!(hidden.is_none());
    }

    #[tokio::test]
    async fn test_find_many_windows_in_id_order() {
        let repo = InMemoryProductRepository::new();
        for i in 0..5 {
            repo.create("alice", fields(&format!("p{i}"))).await.unwrap();
        }
        repo.create("bob", fields("other")).await.unwrap();

        let filter = ProductFilter::owned_by(&Caller::new("alice"));
        let page = repo
            .find_many(&filter, PageWindow { offset: 1, limit: 2 })
            .await
            .unwrap();

        let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p2"]);
        assert_eq!(repo.count(&filter).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_find_many_past_the_end_is_empty() {
        let repo = InMemoryProductRepository::new();
        repo.create("alice", fields("a")).await.unwrap();

        let filter = ProductFilter::owned_by(&Caller::new("alice"));
        let page = repo
            .find_many(&filter, PageWindow::new(u64::MAX, 100))
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_update_returns_none_when_unmatched() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create("alice", fields("a")).await.unwrap();

        let filter = ProductFilter::owned_product(&Caller::new("bob"), product.id);
        assert!(repo.update(&filter, fields("b")).await.unwrap().is_none());

        let unchanged = repo
            .find_one(&ProductFilter::owned_product(&Caller::new("alice"), product.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.name, "a");
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create("alice", fields("a")).await.unwrap();

        let filter = ProductFilter::owned_product(&Caller::new("alice"), product.id);
        let mut changes = fields("renamed");
        changes.description = None;

        let updated = repo.update(&filter, changes).await.unwrap().unwrap();
        assert_eq!(updated.id, product.id);
        assert_eq!(updated.username, "alice");
        assert_eq!(updated.name, "renamed");
        assert!(updated.description.is_none());
    }

    #[tokio::test]
    async fn test_delete_counts_removed_rows() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create("alice", fields("a")).await.unwrap();
        let filter = ProductFilter::owned_product(&Caller::new("alice"), product.id);

        assert_eq!(repo.delete(&filter).await.unwrap(), 1);
        assert_eq!(repo.delete(&filter).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_with_contains_predicate() {
        let repo = InMemoryProductRepository::new();
        for name in ["test 1", "test 10", "test 2"] {
            repo.create("alice", fields(name)).await.unwrap();
        }

        let filter = ProductFilter::owned_by(&Caller::new("alice"))
            .and(Predicate::NameContains("test 1".into()));
        assert_eq!(repo.count(&filter).await.unwrap(), 2);
    }
}
