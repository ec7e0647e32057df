//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Owner scoping holds in the generated SQL
//! - LIKE filters treat `%` and `_` literally
//! - Paging counts match the stored rows
//!
//! Run with `--ignored` on a machine with Docker.

use domain_products::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn fields(name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        price: 1000.0,
        stock: 100,
        description: Some("Product test description".to_string()),
        category: "Product test category".to_string(),
        image_url: "https://example.com/image.png".to_string(),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_find");

    let owner = db.create_test_user(&builder.username("owner"), None).await;
    let caller = Caller::new(&owner);

    let created = repo.create(&owner, fields("lamp")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.username, owner);
    assert_eq!(created.description.as_deref(), Some("Product test description"));

    let found = repo
        .find_one(&ProductFilter::owned_product(&caller, created.id))
        .await
        .unwrap();
    let found = assert_some(found, "product should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "lamp");
    assert_eq!(found.price, 1000.0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_owner_scoping() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("owner_scoping");

    let owner = db.create_test_user(&builder.username("owner"), None).await;
    let stranger = db.create_test_user(&builder.username("stranger"), None).await;

    let created = repo.create(&owner, fields("lamp")).await.unwrap();
    let foreign = ProductFilter::owned_product(&Caller::new(&stranger), created.id);

    assert!(repo.find_one(&foreign).await.unwrap().is_none());
    assert_eq!(repo.count(&foreign).await.unwrap(), 0);
    assert!(repo.update(&foreign, fields("stolen")).await.unwrap().is_none());
    assert_eq!(repo.delete(&foreign).await.unwrap(), 0);

    let mine = ProductFilter::owned_product(&Caller::new(&owner), created.id);
    let still_there = assert_some(repo.find_one(&mine).await.unwrap(), "owner keeps product");
    assert_eq!(still_there.name, "lamp");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_overwrites_fields() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_overwrites");

    let owner = db.create_test_user(&builder.username("owner"), None).await;
    let created = repo.create(&owner, fields("lamp")).await.unwrap();
    let filter = ProductFilter::owned_product(&Caller::new(&owner), created.id);

    let updated = repo
        .update(
            &filter,
            CreateProduct {
                description: None,
                stock: 3,
                ..fields("desk lamp")
            },
        )
        .await
        .unwrap();
    let updated = assert_some(updated, "update should match");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.username, owner);
    assert_eq!(updated.name, "desk lamp");
    assert_eq!(updated.stock, 3);
    assert_eq!(updated.description, None);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_twice() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_twice");

    let owner = db.create_test_user(&builder.username("owner"), None).await;
    let created = repo.create(&owner, fields("lamp")).await.unwrap();
    let filter = ProductFilter::owned_product(&Caller::new(&owner), created.id);

    assert_eq!(repo.delete(&filter).await.unwrap(), 1);
    assert_eq!(repo.delete(&filter).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_like_wildcards_are_literal() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("like_literal");

    let owner = db.create_test_user(&builder.username("owner"), None).await;
    repo.create(&owner, fields("50% off")).await.unwrap();
    repo.create(&owner, fields("500 off")).await.unwrap();

    let filter = ProductFilter::owned_by(&Caller::new(&owner))
        .and(Predicate::NameContains("50%".to_string()));

    assert_eq!(repo.count(&filter).await.unwrap(), 1);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_paging_against_postgres() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("search_paging");

    let owner = db.create_test_user(&builder.username("owner"), None).await;
    let caller = Caller::new(&owner);
    let service = ProductService::new(PgProductRepository::new(db.connection()));

    for i in 0..15 {
        service
            .create(
                &caller,
                serde_json::json!({
                    "name": format!("test {i}"),
                    "price": 1000,
                    "stock": 100,
                    "category": "Product test category",
                    "imageUrl": "https://example.com/image.png"
                }),
            )
            .await
            .unwrap();
    }

    let first = service.search(&caller, serde_json::json!({})).await.unwrap();
    assert_eq!(first.data.len(), 10);
    assert_eq!(first.paging.total_item, 15);
    assert_page_count(first.paging.total_item, 10, first.paging.total_page);

    let second = service
        .search(&caller, serde_json::json!({ "page": 2 }))
        .await
        .unwrap();
    assert_eq!(second.data.len(), 5);

    let named = service
        .search(&caller, serde_json::json!({ "name": "test 1" }))
        .await
        .unwrap();
    assert_eq!(named.data.len(), 6);
}
