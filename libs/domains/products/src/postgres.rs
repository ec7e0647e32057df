use async_trait::async_trait;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::ProductResult,
    models::{CreateProduct, Product},
    query::{PageWindow, Predicate, ProductFilter},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `%needle%` with LIKE metacharacters in the needle escaped
fn contains_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

/// AND of every predicate in the filter
pub(crate) fn condition(filter: &ProductFilter) -> Condition {
    use entity::Column;

    filter
        .predicates()
        .iter()
        .fold(Condition::all(), |cond, predicate| {
            cond.add(match predicate {
                Predicate::OwnerEq(owner) => Column::Username.eq(owner.as_str()),
                Predicate::IdEq(id) => Column::Id.eq(*id),
                Predicate::NameContains(s) => Column::Name.like(contains_pattern(s)),
                Predicate::DescriptionContains(s) => Column::Description.like(contains_pattern(s)),
                Predicate::CategoryContains(s) => Column::Category.like(contains_pattern(s)),
                Predicate::ImageUrlContains(s) => Column::ImageUrl.like(contains_pattern(s)),
                Predicate::PriceEq(price) => Column::Price.eq(*price),
                Predicate::StockEq(stock) => Column::Stock.eq(*stock),
            })
        })
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, owner: &str, fields: CreateProduct) -> ProductResult<Product> {
        let model = entity::ActiveModel::new_owned(owner, fields)
            .insert(&self.db)
            .await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn find_one(&self, filter: &ProductFilter) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(condition(filter))
            .order_by_asc(entity::Column::Id)
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_many(
        &self,
        filter: &ProductFilter,
        window: PageWindow,
    ) -> ProductResult<Vec<Product>> {
        // Postgres OFFSET is a signed bigint
        let offset = window.offset.min(i64::MAX as u64);

        let models = entity::Entity::find()
            .filter(condition(filter))
            .order_by_asc(entity::Column::Id)
            .offset(offset)
            .limit(window.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let total = entity::Entity::find()
            .filter(condition(filter))
            .count(&self.db)
            .await?;

        Ok(total)
    }

    async fn update(
        &self,
        filter: &ProductFilter,
        fields: CreateProduct,
    ) -> ProductResult<Option<Product>> {
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel::changes(fields))
            .filter(condition(filter))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let updated = self.find_one(filter).await?;
        if let Some(product) = &updated {
            tracing::info!(product_id = product.id, "Updated product");
        }
        Ok(updated)
    }

    async fn delete(&self, filter: &ProductFilter) -> ProductResult<u64> {
        let result = entity::Entity::delete_many()
            .filter(condition(filter))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(removed = result.rows_affected, "Deleted products");
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Caller;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(filter: &ProductFilter) -> String {
        entity::Entity::find()
            .filter(condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_condition_scopes_owner_and_id() {
        let sql = sql(&ProductFilter::owned_product(&Caller::new("alice"), 7));
        assert!(sql.contains(r#""products"."username" = 'alice'"#), "{sql}");
        assert!(sql.contains(r#""products"."id" = 7"#), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_contains_escapes_like_wildcards() {
        let filter = ProductFilter::owned_by(&Caller::new("alice"))
            .and(Predicate::NameContains("50%_off".into()));

        let sql = sql(&filter);
        assert!(sql.contains("LIKE"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(sql.contains(r"50\") && sql.contains(r"\_off"), "{sql}");
    }
}
