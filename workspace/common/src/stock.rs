use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Ingredient response model with derived stock flags.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IngredientDto {
    pub id: i32,
    pub name: String,
    pub quantity: Decimal,
    pub reorder_level: Decimal,
    pub expiry_date: Option<NaiveDate>,
    pub cost_per_unit: Decimal,
    pub unit: Option<String>,
    /// Effective remaining quantity (stored value or derived from today's sales)
    pub remaining: Decimal,
    pub low_stock: bool,
    pub expired: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct CreateIngredientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub quantity: Decimal,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub reorder_level: Decimal,
    pub expiry_date: Option<NaiveDate>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub cost_per_unit: Decimal,
    pub unit: Option<String>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub remaining: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct UpdateIngredientRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub quantity: Option<Decimal>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub reorder_level: Option<Decimal>,
    pub expiry_date: Option<NaiveDate>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub cost_per_unit: Option<Decimal>,
    pub unit: Option<String>,
    #[validate(custom(function = "crate::validate_non_negative"))]
    pub remaining: Option<Decimal>,
}
