//! Search request to filter, window and paging translation.
//!
//! A [`ProductFilter`] is a conjunction of [`Predicate`]s and always starts
//! with the owner. Repositories interpret it: the in-memory store through
//! [`ProductFilter::matches`], Postgres by turning it into a sea-orm
//! `Condition`.

use crate::models::{Caller, Paging, Product, SearchProduct};

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    OwnerEq(String),
    IdEq(i64),
    NameContains(String),
    DescriptionContains(String),
    CategoryContains(String),
    ImageUrlContains(String),
    PriceEq(f64),
    StockEq(i32),
}

impl Predicate {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Predicate::OwnerEq(owner) => product.username == *owner,
            Predicate::IdEq(id) => product.id == *id,
            Predicate::NameContains(s) => product.name.contains(s.as_str()),
            Predicate::DescriptionContains(s) => product
                .description
                .as_deref()
                .is_some_and(|d| d.contains(s.as_str())),
            Predicate::CategoryContains(s) => product.category.contains(s.as_str()),
            Predicate::ImageUrlContains(s) => product.image_url.contains(s.as_str()),
            Predicate::PriceEq(price) => product.price == *price,
            Predicate::StockEq(stock) => product.stock == *stock,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    predicates: Vec<Predicate>,
}

impl ProductFilter {
    /// Everything the caller owns
    pub fn owned_by(caller: &Caller) -> Self {
        Self {
            predicates: vec![Predicate::OwnerEq(caller.username().to_string())],
        }
    }

    /// The caller's product with this id, if any
    pub fn owned_product(caller: &Caller, id: i64) -> Self {
        Self::owned_by(caller).and(Predicate::IdEq(id))
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.predicates.iter().all(|p| p.matches(product))
    }
}

/// Offset/limit pair for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// `page` is 1-based. Offsets too large to represent saturate, giving an
    /// empty page instead of an overflow.
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(size),
            limit: size,
        }
    }
}

/// Everything a repository needs to answer one search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub filter: ProductFilter,
    pub window: PageWindow,
    pub page: u64,
    pub size: u64,
}

impl SearchPlan {
    pub fn build(caller: &Caller, request: &SearchProduct) -> Self {
        let mut filter = ProductFilter::owned_by(caller);

        if let Some(name) = &request.name {
            filter = filter.and(Predicate::NameContains(name.clone()));
        }
        if let Some(price) = request.price {
            filter = filter.and(Predicate::PriceEq(price));
        }
        if let Some(stock) = request.stock {
            filter = filter.and(Predicate::StockEq(stock));
        }
        if let Some(description) = &request.description {
            filter = filter.and(Predicate::DescriptionContains(description.clone()));
        }
        if let Some(category) = &request.category {
            filter = filter.and(Predicate::CategoryContains(category.clone()));
        }
        if let Some(image_url) = &request.image_url {
            filter = filter.and(Predicate::ImageUrlContains(image_url.clone()));
        }

        Self {
            filter,
            window: PageWindow::new(request.page, request.size),
            page: request.page,
            size: request.size,
        }
    }

    /// Paging metadata for a count taken with this plan's filter
    pub fn paging(&self, total_item: u64) -> Paging {
        Paging::new(self.page, self.size, total_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn product(id: i64, owner: &str, name: &str) -> Product {
        Product::new(
            id,
            owner,
            CreateProduct {
                name: name.into(),
                price: 100.0,
                stock: 5,
                description: None,
                category: "tools".into(),
                image_url: "https://img/x.png".into(),
            },
        )
    }

    #[test]
    fn test_filter_always_scoped_to_owner() {
        let caller = Caller::new("alice");
        let plan = SearchPlan::build(&caller, &SearchProduct::default());

        assert_eq!(
            plan.filter.predicates(),
            &[Predicate::OwnerEq("alice".into())]
        );
        assert!(plan.filter.matches(&product(1, "alice", "a")));
        assert!(!plan.filter.matches(&product(2, "bob", "a")));
    }

    #[test]
    fn test_every_supplied_field_adds_a_conjunct() {
        let request = SearchProduct {
            name: Some("test 1".into()),
            price: Some(100.0),
            stock: Some(5),
            description: Some("d".into()),
            category: Some("too".into()),
            image_url: Some("img".into()),
            ..SearchProduct::default()
        };

        let plan = SearchPlan::build(&Caller::new("alice"), &request);
        assert_eq!(plan.filter.predicates().len(), 7);
    }

    #[test]
    fn test_contains_is_case_sensitive() {
        let filter = ProductFilter::owned_by(&Caller::new("alice"))
            .and(Predicate::NameContains("Test".into()));

        assert!(filter.matches(&product(1, "alice", "A Test item")));
        assert!(!filter.matches(&product(2, "alice", "a test item")));
    }

    #[test]
    fn test_description_contains_skips_missing() {
        let filter = ProductFilter::owned_by(&Caller::new("alice"))
            .and(Predicate::DescriptionContains("x".into()));

        assert!(!filter.matches(&product(1, "alice", "a")));
    }

    #[test]
    fn test_owned_product_filter() {
        let filter = ProductFilter::owned_product(&Caller::new("alice"), 2);

        assert!(filter.matches(&product(2, "alice", "a")));
        assert!(!filter.matches(&product(3, "alice", "a")));
        assert!(!filter.matches(&product(2, "bob", "a")));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(PageWindow::new(1, 10), PageWindow { offset: 0, limit: 10 });
        assert_eq!(PageWindow::new(2, 10), PageWindow { offset: 10, limit: 10 });
        assert_eq!(PageWindow::new(u64::MAX, 100).offset, u64::MAX);
    }

    #[test]
    fn test_plan_paging() {
        let request = SearchProduct {
            page: 2,
            ..SearchProduct::default()
        };
        let plan = SearchPlan::build(&Caller::new("alice"), &request);

        assert_eq!(
            plan.paging(15),
            Paging {
                page: 2,
                total_item: 15,
                total_page: 2
            }
        );
    }
}
