//! Row builders shared by the compute unit tests.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use model::entities::{ingredient, menu, menu_ingredient, order};

/// A day in March 2025.
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// India Standard Time, UTC+05:30.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(330 * 60).unwrap()
}

pub fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 15, 0).unwrap()
}

pub fn menu_item(id: i32, name: &str, price: i64, sold_today: i32, category: &str) -> menu::Model {
    menu::Model {
        id,
        created_at: at(day(1), 7),
        item: name.to_string(),
        price: Decimal::from(price),
        availability: true,
        category: category.to_string(),
        nutritional_info: None,
        daily_demand: Some(50),
        sold_today,
        image_url: None,
    }
}

pub fn ingredient_row(
    id: i32,
    name: &str,
    quantity: i64,
    reorder_level: i64,
    remaining: Option<i64>,
) -> ingredient::Model {
    ingredient::Model {
        id,
        name: name.to_string(),
        quantity: Decimal::from(quantity),
        reorder_level: Decimal::from(reorder_level),
        expiry_date: None,
        cost_per_unit: Decimal::from(10),
        unit: Some("kg".to_string()),
        remaining_ingredient: remaining.map(Decimal::from),
    }
}

pub fn link(id: i32, menu_id: i32, ingredient_id: i32, quantity: Decimal) -> menu_ingredient::Model {
    menu_ingredient::Model { id, menu_id, ingredient_id, quantity }
}

pub fn order_row(
    id: i32,
    created_at: NaiveDateTime,
    quantity: i32,
    amount: Option<i64>,
    menu_id: Option<i32>,
) -> order::Model {
    order::Model {
        id,
        created_at,
        quantity,
        amount: amount.map(Decimal::from),
        status: order::OrderStatus::Pending,
        payment_method: None,
        expected_time: None,
        menu_id,
        student_id: None,
    }
}
