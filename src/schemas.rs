use axum::{http::StatusCode, response::Json};
use chrono::{FixedOffset, NaiveDate};
use clients::{ForecastSource, TextGenerator};
use common::{
    CategoryRevenue, ChangeEvent, ChangeKind, Confidence, CreateIngredientRequest,
    CreateMenuItemRequest, CreateOrderRequest, CreateStudentRequest, DailyPoint,
    DashboardSummary, DemandComparison, DepletedIngredient, ForecastEntry, ForecastView,
    HourlyPoint, IngredientDto, IngredientLinkRequest, MenuIngredientDto, MenuItemDto,
    NutritionalInfo, OrderDto, OrderStatus, OverviewSummary, StatusCounts, StudentDto,
    SuggestionSet, Table, TopSellingItem, UpdateIngredientRequest, UpdateMenuItemRequest,
    UpdateOrderStatusRequest,
};
use model::entities::{ingredient, menu, menu_ingredient, order, student};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::config::AppConfig;
use crate::realtime::ChangeFeed;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Per-table change notifications
    pub changes: ChangeFeed,
    /// Demand forecasting service
    pub forecast: Arc<dyn ForecastSource>,
    /// Generative-text service used for suggestions
    pub text: Arc<dyn TextGenerator>,
    pub config: Arc<AppConfig>,
}

/// Query parameters for views computed relative to a day
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct TodayQuery {
    /// Day treated as "today" (YYYY-MM-DD); defaults to the current date at the configured UTC offset
    pub today: Option<NaiveDate>,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ForecastQuery {
    /// Forecast date to show (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    /// Day treated as "today" when picking a default date
    pub today: Option<NaiveDate>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self { data, message: message.into(), success: true }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Error half of every handler result.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, code: &str, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Shorthand for store failures.
pub fn database_error(error: impl Into<String>) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", error)
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

pub fn status_to_model(status: OrderStatus) -> order::OrderStatus {
    match status {
        OrderStatus::Pending => order::OrderStatus::Pending,
        OrderStatus::Preparing => order::OrderStatus::Preparing,
        OrderStatus::Ready => order::OrderStatus::Ready,
        OrderStatus::Completed => order::OrderStatus::Completed,
    }
}

pub fn status_from_model(status: order::OrderStatus) -> OrderStatus {
    match status {
        order::OrderStatus::Pending => OrderStatus::Pending,
        order::OrderStatus::Preparing => OrderStatus::Preparing,
        order::OrderStatus::Ready => OrderStatus::Ready,
        order::OrderStatus::Completed => OrderStatus::Completed,
    }
}

pub fn nutrition_to_model(info: NutritionalInfo) -> menu::Nutrition {
    menu::Nutrition {
        calories: info.calories,
        protein: info.protein,
        carbs: info.carbs,
        fat: info.fat,
    }
}

fn nutrition_from_model(info: Option<menu::Nutrition>) -> NutritionalInfo {
    info.map(|info| NutritionalInfo {
        calories: info.calories,
        protein: info.protein,
        carbs: info.carbs,
        fat: info.fat,
    })
    .unwrap_or_default()
}

/// Builds the menu response from the row and its `(association, ingredient)` pairs.
pub fn menu_item_dto(
    model: menu::Model,
    links: &[(menu_ingredient::Model, Option<ingredient::Model>)],
) -> MenuItemDto {
    let ingredients = links
        .iter()
        .filter(|(link, _)| link.menu_id == model.id)
        .map(|(link, ingredient)| MenuIngredientDto {
            ingredient_id: link.ingredient_id,
            ingredient_name: ingredient.as_ref().map(|i| i.name.clone()),
            quantity: link.quantity,
        })
        .collect();

    MenuItemDto {
        id: model.id,
        created_at: model.created_at,
        item: model.item,
        price: model.price,
        availability: model.availability,
        category: model.category,
        nutritional_info: nutrition_from_model(model.nutritional_info),
        daily_demand: model.daily_demand,
        sold_today: model.sold_today,
        image_url: model.image_url,
        ingredients,
    }
}

/// Builds the order response joined with its menu item and student, when known.
pub fn order_dto(
    model: order::Model,
    menu_item: Option<&menu::Model>,
    student: Option<&student::Model>,
) -> OrderDto {
    let total = compute::sales::order_amount(&model, menu_item.map(|item| item.price));
    OrderDto {
        id: model.id,
        created_at: model.created_at,
        quantity: model.quantity,
        amount: model.amount,
        total,
        status: status_from_model(model.status),
        payment_method: model.payment_method,
        expected_time: model.expected_time,
        menu_id: model.menu_id,
        menu_item: menu_item.map(|item| item.item.clone()),
        student_id: model.student_id,
        student_name: student.map(|s| s.name.clone()),
    }
}

pub fn student_dto(model: student::Model) -> StudentDto {
    StudentDto {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
    }
}

/// Configured profit margin, or a 500 when it is out of range.
pub fn configured_margin(config: &AppConfig) -> Result<Decimal, ApiError> {
    config.margin().map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CONFIGURATION_ERROR",
            format!("Invalid profit margin: {}", e),
        )
    })
}

/// The canteen's UTC offset, or a 500 when the configuration is invalid.
pub fn configured_offset(config: &AppConfig) -> Result<FixedOffset, ApiError> {
    config.utc_offset().map_err(|e| {
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CONFIGURATION_ERROR",
            format!("Invalid UTC offset: {}", e),
        )
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::menu::get_menu,
        crate::handlers::menu::create_menu_item,
        crate::handlers::menu::update_menu_item,
        crate::handlers::ingredients::get_ingredients,
        crate::handlers::ingredients::create_ingredient,
        crate::handlers::ingredients::update_ingredient,
        crate::handlers::orders::get_orders,
        crate::handlers::orders::create_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::students::get_students,
        crate::handlers::students::create_student,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::dashboard::get_overview,
        crate::handlers::forecast::get_forecast,
        crate::handlers::suggestions::get_suggestions,
        crate::handlers::realtime::stream_changes,
    ),
    components(
        schemas(
            ApiResponse<DashboardSummary>,
            ErrorResponse,
            HealthResponse,
            TodayQuery,
            ForecastQuery,
            MenuItemDto,
            MenuIngredientDto,
            NutritionalInfo,
            CreateMenuItemRequest,
            UpdateMenuItemRequest,
            IngredientLinkRequest,
            IngredientDto,
            CreateIngredientRequest,
            UpdateIngredientRequest,
            OrderDto,
            OrderStatus,
            CreateOrderRequest,
            UpdateOrderStatusRequest,
            StudentDto,
            CreateStudentRequest,
            DashboardSummary,
            OverviewSummary,
            TopSellingItem,
            DepletedIngredient,
            DailyPoint,
            HourlyPoint,
            CategoryRevenue,
            StatusCounts,
            ForecastEntry,
            ForecastView,
            DemandComparison,
            Confidence,
            SuggestionSet,
            ChangeEvent,
            ChangeKind,
            Table,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "menu", description = "Menu items and their ingredients"),
        (name = "ingredients", description = "Ingredient stock"),
        (name = "orders", description = "Student orders"),
        (name = "students", description = "Students placing orders"),
        (name = "analytics", description = "Dashboard and overview aggregates"),
        (name = "forecast", description = "Demand forecast"),
        (name = "suggestions", description = "Generated operational suggestions"),
        (name = "realtime", description = "Server-sent change events"),
    ),
    info(
        title = "Canteen API",
        description = "Canteen management API - orders, menu, stock, sales analytics and demand forecasting",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
