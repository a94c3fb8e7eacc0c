use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{ingredient, menu, menu_ingredient, order, student};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create Student table
        manager
            .create_table(
                Table::create()
                    .table(Student::table())
                    .if_not_exists()
                    .col(pk_auto(Student::column(student::Column::Id)))
                    .col(string(Student::column(student::Column::Name)))
                    .col(
                        date_time(Student::column(student::Column::CreatedAt))
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create Menu table
        manager
            .create_table(
                Table::create()
                    .table(Menu::table())
                    .if_not_exists()
                    .col(pk_auto(Menu::column(menu::Column::Id)))
                    .col(
                        date_time(Menu::column(menu::Column::CreatedAt))
                            .default(Expr::current_timestamp()),
                    )
                    .col(string(Menu::column(menu::Column::Item)))
                    .col(decimal(Menu::column(menu::Column::Price)).decimal_len(10, 2))
                    .col(boolean(Menu::column(menu::Column::Availability)).default(true))
                    .col(string(Menu::column(menu::Column::Category)).default(""))
                    .col(json_null(Menu::column(menu::Column::NutritionalInfo)))
                    .col(integer_null(Menu::column(menu::Column::DailyDemand)))
                    .col(integer(Menu::column(menu::Column::SoldToday)).default(0))
                    .col(string_null(Menu::column(menu::Column::ImageUrl)))
                    .to_owned(),
            )
            .await?;

        // Create Ingredients table
        manager
            .create_table(
                Table::create()
                    .table(Ingredient::table())
                    .if_not_exists()
                    .col(pk_auto(Ingredient::column(ingredient::Column::Id)))
                    .col(string(Ingredient::column(ingredient::Column::Name)))
                    .col(decimal(Ingredient::column(ingredient::Column::Quantity)).decimal_len(12, 3))
                    .col(
                        decimal(Ingredient::column(ingredient::Column::ReorderLevel))
                            .decimal_len(12, 3),
                    )
                    .col(date_null(Ingredient::column(ingredient::Column::ExpiryDate)))
                    .col(
                        decimal(Ingredient::column(ingredient::Column::CostPerUnit))
                            .decimal_len(10, 2),
                    )
                    .col(string_null(Ingredient::column(ingredient::Column::Unit)))
                    .col(
                        decimal_null(Ingredient::column(ingredient::Column::RemainingIngredient))
                            .decimal_len(12, 3),
                    )
                    .to_owned(),
            )
            .await?;

        // Create Menu_ingredients table (join table)
        manager
            .create_table(
                Table::create()
                    .table(MenuIngredient::table())
                    .if_not_exists()
                    .col(pk_auto(MenuIngredient::column(menu_ingredient::Column::Id)))
                    .col(integer(MenuIngredient::column(menu_ingredient::Column::MenuId)))
                    .col(integer(MenuIngredient::column(menu_ingredient::Column::IngredientId)))
                    .col(
                        decimal(MenuIngredient::column(menu_ingredient::Column::Quantity))
                            .decimal_len(12, 3),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_ingredients_menu")
                            .from(
                                MenuIngredient::table(),
                                MenuIngredient::column(menu_ingredient::Column::MenuId),
                            )
                            .to(Menu::table(), Menu::column(menu::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_ingredients_ingredient")
                            .from(
                                MenuIngredient::table(),
                                MenuIngredient::column(menu_ingredient::Column::IngredientId),
                            )
                            .to(Ingredient::table(), Ingredient::column(ingredient::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create Orders table
        manager
            .create_table(
                Table::create()
                    .table(Order::table())
                    .if_not_exists()
                    .col(pk_auto(Order::column(order::Column::Id)))
                    .col(
                        date_time(Order::column(order::Column::CreatedAt))
                            .default(Expr::current_timestamp()),
                    )
                    .col(integer(Order::column(order::Column::Quantity)).default(1))
                    .col(decimal_null(Order::column(order::Column::Amount)).decimal_len(10, 2))
                    .col(
                        string(Order::column(order::Column::Status))
                            .string_len(20)
                            .default("pending"),
                    )
                    .col(string_null(Order::column(order::Column::PaymentMethod)))
                    .col(date_time_null(Order::column(order::Column::ExpectedTime)))
                    .col(integer_null(Order::column(order::Column::MenuId)))
                    .col(integer_null(Order::column(order::Column::StudentId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_menu")
                            .from(Order::table(), Order::column(order::Column::MenuId))
                            .to(Menu::table(), Menu::column(menu::Column::Id))
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_student")
                            .from(Order::table(), Order::column(order::Column::StudentId))
                            .to(Student::table(), Student::column(student::Column::Id))
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Order::table()).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MenuIngredient::table()).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Ingredient::table()).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Menu::table()).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Student::table()).to_owned())
            .await?;

        Ok(())
    }
}
