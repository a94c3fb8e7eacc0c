//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.

mod dashboard;
mod forecast;
mod login;
mod menu;
mod money;
mod orders;
mod realtime;
mod stock;
mod suggestions;

pub use dashboard::{
    CategoryRevenue, DailyPoint, DashboardSummary, DepletedIngredient, HourlyPoint,
    OverviewSummary, StatusCounts, TopSellingItem,
};
pub use forecast::{Confidence, DemandComparison, ForecastEntry, ForecastResponse, ForecastView};
pub use login::{validate_login, LoginError};
pub use menu::{
    CreateMenuItemRequest, IngredientLinkRequest, MenuIngredientDto, MenuItemDto,
    NutritionalInfo, UpdateMenuItemRequest,
};
pub use money::{format_inr, format_quantity};
pub use orders::{
    CreateOrderRequest, CreateStudentRequest, OrderDto, OrderStatus, StudentDto,
    UpdateOrderStatusRequest,
};
pub use realtime::{ChangeEvent, ChangeKind, Table};
pub use stock::{CreateIngredientRequest, IngredientDto, UpdateIngredientRequest};
pub use suggestions::SuggestionSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in canteen/src/schemas.rs with the
/// same field names. We mirror it here for the frontend to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Validator for decimal fields that must be strictly positive.
pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_positive"))
    }
}

/// Validator for decimal fields that must not be negative.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("must_not_be_negative"))
    }
}
