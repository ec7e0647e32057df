//! Token resolution against the `users` table

use async_trait::async_trait;
use axum_helpers::{AppError, AuthenticatedUser, TokenResolver};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity::user;

/// Resolves the raw `Authorization` token to the user owning it
#[derive(Clone)]
pub struct UserTokenResolver {
    db: DatabaseConnection,
}

impl UserTokenResolver {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenResolver for UserTokenResolver {
    async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        let user = user::Entity::find()
            .filter(user::Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Token lookup failed: {e}")))?;

        Ok(user.map(|u| AuthenticatedUser::new(u.username)))
    }
}
