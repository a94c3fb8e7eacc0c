use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::{menu, menu_ingredient};

/// A stock item used by one or more dishes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// On-hand quantity.
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub reorder_level: Decimal,
    pub expiry_date: Option<NaiveDate>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub cost_per_unit: Decimal,
    pub unit: Option<String>,
    /// Remaining quantity as maintained by the store, when it tracks one.
    #[sea_orm(column_type = "Decimal(Some((12, 3)))", nullable)]
    pub remaining_ingredient: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_ingredient::Entity")]
    MenuIngredient,
}

impl Related<menu_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuIngredient.def()
    }
}

impl Related<menu::Entity> for Entity {
    fn to() -> RelationDef {
        menu_ingredient::Relation::Menu.def()
    }
    fn via() -> Option<RelationDef> {
        Some(menu_ingredient::Relation::Ingredient.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when the ingredient expired strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < today)
    }
}
