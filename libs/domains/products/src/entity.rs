use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock: i32,
    pub description: Option<String>,
    pub category: String,
    pub image_url: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            price: model.price,
            stock: model.stock,
            description: model.description,
            category: model.category,
            image_url: model.image_url,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Insert model; the id comes from the sequence.
    pub fn new_owned(owner: &str, fields: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            username: Set(owner.to_string()),
            created_at: Set(now.into()),
            ..Self::changes(fields)
        }
    }

    /// Mutable columns only, for `update_many`; id, owner and created_at stay
    /// `NotSet`.
    pub fn changes(fields: CreateProduct) -> Self {
        Self {
            id: NotSet,
            username: NotSet,
            name: Set(fields.name),
            price: Set(fields.price),
            stock: Set(fields.stock),
            description: Set(fields.description),
            category: Set(fields.category),
            image_url: Set(fields.image_url),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        }
    }
}
