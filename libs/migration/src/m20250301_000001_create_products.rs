use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Products::Username, 100))
                    .col(string_len(Products::Name, 100))
                    .col(double(Products::Price))
                    .col(integer(Products::Stock))
                    .col(string_len_null(Products::Description, 100))
                    .col(string_len(Products::Category, 100))
                    .col(string_len(Products::ImageUrl, 1000))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_username")
                            .from(Products::Table, Products::Username)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Every query filters by owner first
        manager
            .create_index(
                Index::create()
                    .name("idx_products_username_id")
                    .table(Products::Table)
                    .col(Products::Username)
                    .col(Products::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Username,
    Name,
    Price,
    Stock,
    Description,
    Category,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
}
