use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{menu_ingredient, order};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Orders are always listed by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_created_at")
                    .table(Order::table())
                    .col(Order::column(order::Column::CreatedAt))
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_menu_ingredients_menu_id")
                    .table(MenuIngredient::table())
                    .col(MenuIngredient::column(menu_ingredient::Column::MenuId))
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_menu_ingredients_menu_id")
                    .table(MenuIngredient::table())
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_orders_created_at")
                    .table(Order::table())
                    .to_owned(),
            )
            .await
    }
}
