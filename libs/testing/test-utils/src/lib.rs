//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with the workspace migrations
//!   applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data generation
//! - `assertions`: assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let owner = db.create_test_user(&builder.username("owner"), None).await;
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Seeds derived from the test name keep data stable across runs while
/// keeping tests that share a database from colliding.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Owner username unique to this test; `role` separates users within it.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.username("alice"), "user-7-alice");
    /// ```
    pub fn username(&self, role: &str) -> String {
        format!("user-{}-{}", self.seed, role)
    }

    /// Access token paired with [`username`](Self::username).
    pub fn token(&self, role: &str) -> String {
        format!("token-{}-{}", self.seed, role)
    }

    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert `total_page == ceil(total_item / size)`.
    pub fn assert_page_count(total_item: u64, size: u64, total_page: u64) {
        let expected = total_item.div_ceil(size);
        assert_eq!(
            total_page, expected,
            "total_page for {} items at size {}: expected {}, got {}",
            total_item, size, expected, total_page
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.username("owner"), builder2.username("owner"));
        assert_eq!(
            builder1.name("product", "test"),
            builder2.name("product", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.username("owner"), builder2.username("owner"));
    }

    #[test]
    fn test_page_count_assertion() {
        assertions::assert_page_count(15, 10, 2);
        assertions::assert_page_count(0, 10, 0);
        assertions::assert_page_count(20, 10, 2);
    }

    #[test]
    #[should_panic(expected = "total_page")]
    fn test_page_count_assertion_fails() {
        assertions::assert_page_count(15, 10, 1);
    }
}
