//! Revenue and order aggregations.

use chrono::{Duration, FixedOffset, NaiveDate, Timelike};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use common::{CategoryRevenue, DailyPoint, HourlyPoint, StatusCounts, TopSellingItem};
use model::entities::{menu, order};

use crate::error::{ComputeError, Result};
use crate::local_time;
use crate::snapshot::MenuIndex;

const UNCATEGORIZED: &str = "Uncategorized";

/// Amount charged for an order: the recorded amount, or the menu price
/// times quantity when none was recorded. Unknown prices count as zero.
pub fn order_amount(order: &order::Model, menu_price: Option<Decimal>) -> Decimal {
    match order.amount {
        Some(amount) => amount,
        None => menu_price.unwrap_or(Decimal::ZERO) * Decimal::from(order.quantity),
    }
}

fn amount_with_index(order: &order::Model, menu: &MenuIndex<'_>) -> Decimal {
    let price = order.menu_id.and_then(|id| menu.get(&id)).map(|item| item.price);
    order_amount(order, price)
}

pub fn total_revenue(orders: &[order::Model], menu: &MenuIndex<'_>) -> Decimal {
    orders.iter().map(|o| amount_with_index(o, menu)).sum()
}

/// Revenue of orders created on the local calendar day `day`.
pub fn revenue_on(
    orders: &[order::Model],
    menu: &MenuIndex<'_>,
    day: NaiveDate,
    offset: FixedOffset,
) -> Decimal {
    orders_on(orders, day, offset)
        .into_iter()
        .map(|o| amount_with_index(o, menu))
        .sum()
}

/// Orders whose creation time falls on `day` at `offset`.
pub fn orders_on(orders: &[order::Model], day: NaiveDate, offset: FixedOffset) -> Vec<&order::Model> {
    orders
        .iter()
        .filter(|o| local_time(o.created_at, offset).date() == day)
        .collect()
}

/// Estimated profit as a flat share of revenue.
pub fn profit(revenue: Decimal, margin: Decimal) -> Decimal {
    (revenue * margin).round_dp(2)
}

/// Converts a configured margin into a decimal, rejecting values outside `0..=1`.
pub fn margin_from_f64(value: f64) -> Result<Decimal> {
    let margin = Decimal::try_from(value)
        .map_err(|e| ComputeError::InvalidMargin(format!("{value}: {e}")))?
        .round_dp(4);
    if margin < Decimal::ZERO || margin > Decimal::ONE {
        return Err(ComputeError::InvalidMargin(value.to_string()));
    }
    Ok(margin)
}

/// Best sellers by `sold_today × price`, descending. Ties keep menu order.
pub fn top_selling(menu: &[menu::Model], n: usize) -> Vec<TopSellingItem> {
    let mut ranked: Vec<TopSellingItem> = menu
        .iter()
        .map(|item| TopSellingItem {
            menu_id: item.id,
            item: item.item.clone(),
            sold_today: item.sold_today,
            price: item.price,
            revenue: item.revenue_today(),
        })
        .collect();
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(n);
    ranked
}

/// Orders and revenue for each of the `days` days ending at `today`, oldest first.
pub fn daily_trend(
    orders: &[order::Model],
    menu: &MenuIndex<'_>,
    today: NaiveDate,
    days: i64,
    offset: FixedOffset,
) -> Vec<DailyPoint> {
    (0..days)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back);
            let on_day = orders_on(orders, date, offset);
            DailyPoint {
                date,
                label: date.format("%a").to_string(),
                orders: on_day.len() as u64,
                revenue: on_day.iter().map(|o| amount_with_index(o, menu)).sum(),
            }
        })
        .collect()
}

/// Order counts per local hour of day, only for hours that saw orders.
pub fn orders_by_hour(orders: &[order::Model], offset: FixedOffset) -> Vec<HourlyPoint> {
    let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
    for order in orders {
        *buckets.entry(local_time(order.created_at, offset).hour()).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(hour, orders)| HourlyPoint { hour, orders })
        .collect()
}

/// Revenue grouped by the category of the ordered dish, highest first.
pub fn revenue_by_category(orders: &[order::Model], menu: &MenuIndex<'_>) -> Vec<CategoryRevenue> {
    let mut totals: Vec<CategoryRevenue> = Vec::new();
    for order in orders {
        let category = order
            .menu_id
            .and_then(|id| menu.get(&id))
            .map(|item| item.category.trim())
            .filter(|category| !category.is_empty())
            .unwrap_or(UNCATEGORIZED);
        let amount = amount_with_index(order, menu);
        match totals.iter_mut().find(|entry| entry.category == category) {
            Some(entry) => entry.revenue += amount,
            None => totals.push(CategoryRevenue {
                category: category.to_string(),
                revenue: amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    totals
}

pub fn status_counts<'a>(orders: impl IntoIterator<Item = &'a order::Model>) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for order in orders {
        match order.status {
            order::OrderStatus::Pending => counts.pending += 1,
            order::OrderStatus::Preparing => counts.preparing += 1,
            order::OrderStatus::Ready => counts.ready += 1,
            order::OrderStatus::Completed => counts.completed += 1,
        }
    }
    counts
}
