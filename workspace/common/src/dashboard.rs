use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TopSellingItem {
    pub menu_id: i32,
    pub item: String,
    pub sold_today: i32,
    pub price: Decimal,
    /// sold_today × price
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DepletedIngredient {
    pub ingredient_id: i32,
    pub name: String,
    pub quantity: Decimal,
    pub remaining: Decimal,
    pub used: Decimal,
    pub unit: Option<String>,
}

/// Orders and revenue for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// Short weekday label, e.g. "Mon"
    pub label: String,
    pub orders: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HourlyPoint {
    pub hour: u32,
    pub orders: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub preparing: u64,
    pub ready: u64,
    pub completed: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.pending + self.preparing + self.ready + self.completed
    }
}

/// Everything the analytics dashboard renders, computed from fresh rows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub total_orders: u64,
    pub orders_today: u64,
    pub total_revenue: Decimal,
    pub revenue_today: Decimal,
    pub profit_today: Decimal,
    /// Cost of stock that expired before today
    pub expired_loss: Decimal,
    pub low_stock_count: u64,
    pub expired_count: u64,
    pub top_selling: Vec<TopSellingItem>,
    pub top_depleted: Vec<DepletedIngredient>,
    /// Last seven days, oldest first
    pub daily: Vec<DailyPoint>,
    pub orders_by_hour: Vec<HourlyPoint>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub status_counts: StatusCounts,
}

/// Today's operational snapshot for the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OverviewSummary {
    pub today: NaiveDate,
    /// Sum of predicted servings for today; absent when the forecast is unavailable
    pub predicted_demand: Option<i64>,
    pub recommended_servings: Option<i64>,
    pub total_orders: u64,
    pub status_counts: StatusCounts,
    /// Servings ordered today
    pub servings_today: i64,
    pub surplus: Option<i64>,
    pub shortage: Option<i64>,
    pub revenue_today: Decimal,
}
