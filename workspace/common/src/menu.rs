use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Nutritional breakdown of a dish. Every figure is optional because the
/// menu form lets staff leave any of them blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NutritionalInfo {
    pub calories: Option<Decimal>,
    pub protein: Option<Decimal>,
    pub carbs: Option<Decimal>,
    pub fat: Option<Decimal>,
}

/// One ingredient used by a menu item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MenuIngredientDto {
    pub ingredient_id: i32,
    pub ingredient_name: Option<String>,
    pub quantity: Decimal,
}

/// Menu item response model (mirrors backend MenuItemResponse).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MenuItemDto {
    pub id: i32,
    pub created_at: NaiveDateTime,
    pub item: String,
    pub price: Decimal,
    pub availability: bool,
    pub category: String,
    pub nutritional_info: NutritionalInfo,
    pub daily_demand: Option<i32>,
    pub sold_today: i32,
    pub image_url: Option<String>,
    /// Ingredient associations in insertion order.
    pub ingredients: Vec<MenuIngredientDto>,
}

/// Link between a new menu item and an existing ingredient.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct IngredientLinkRequest {
    pub ingredient_id: i32,
    /// Amount of the ingredient used per serving; must be positive.
    #[validate(custom(function = "crate::validate_positive"))]
    pub quantity: Decimal,
}

/// Request body for creating a menu item together with its ingredient links.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct CreateMenuItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub item: String,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub price: Decimal,
    /// Defaults to available
    pub availability: Option<bool>,
    #[validate(length(max = 100))]
    pub category: String,
    pub nutritional_info: Option<NutritionalInfo>,
    #[validate(range(min = 0))]
    pub daily_demand: Option<i32>,
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientLinkRequest>,
}

/// Request body for updating a menu item. Ingredient links are not editable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct UpdateMenuItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub item: Option<String>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub price: Option<Decimal>,
    pub availability: Option<bool>,
    pub category: Option<String>,
    pub nutritional_info: Option<NutritionalInfo>,
    #[validate(range(min = 0))]
    pub daily_demand: Option<i32>,
    #[validate(range(min = 0))]
    pub sold_today: Option<i32>,
    pub image_url: Option<String>,
}
