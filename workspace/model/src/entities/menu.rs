use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use super::{ingredient, menu_ingredient};

/// Nutritional breakdown stored as a JSON document on the menu row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Nutrition {
    pub calories: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub carbs: Option<Decimal>,
    pub fat: Option<Decimal>,
}

/// A dish offered by the canteen.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Menu")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub created_at: DateTime,
    /// Display name of the dish.
    pub item: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    #[sea_orm(default_value = "true")]
    pub availability: bool,
    pub category: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub nutritional_info: Option<Nutrition>,
    /// Target number of servings per day.
    pub daily_demand: Option<i32>,
    #[sea_orm(default_value = "0")]
    pub sold_today: i32,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::menu_ingredient::Entity")]
    MenuIngredient,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<menu_ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuIngredient.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<ingredient::Entity> for Entity {
    fn to() -> RelationDef {
        menu_ingredient::Relation::Ingredient.def()
    }
    fn via() -> Option<RelationDef> {
        Some(menu_ingredient::Relation::Menu.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Revenue attributed to today's sales of this dish.
    pub fn revenue_today(&self) -> Decimal {
        self.price * Decimal::from(self.sold_today)
    }
}
