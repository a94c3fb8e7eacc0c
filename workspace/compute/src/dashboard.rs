//! Assembly of the dashboard and overview summaries from a snapshot.

use chrono::{FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use tracing::instrument;

use common::{DashboardSummary, ForecastEntry, OverviewSummary};

use crate::forecast::{entries_for_date, totals};
use crate::sales::{
    daily_trend, orders_by_hour, orders_on, profit, revenue_by_category, revenue_on, status_counts,
    top_selling, total_revenue,
};
use crate::snapshot::Snapshot;
use crate::stock::{expired_loss, is_expired, stock_levels, top_depleted};
use crate::{TOP_N, TREND_DAYS};

#[instrument(skip(snapshot))]
pub fn dashboard_summary(
    snapshot: &Snapshot,
    today: NaiveDate,
    margin: Decimal,
    offset: FixedOffset,
) -> DashboardSummary {
    let menu = snapshot.menu_index();
    let revenue_today = revenue_on(&snapshot.orders, &menu, today, offset);
    let levels = stock_levels(&snapshot.ingredients, &menu, &snapshot.links, today);

    DashboardSummary {
        today,
        total_orders: snapshot.orders.len() as u64,
        orders_today: orders_on(&snapshot.orders, today, offset).len() as u64,
        total_revenue: total_revenue(&snapshot.orders, &menu),
        revenue_today,
        profit_today: profit(revenue_today, margin),
        expired_loss: expired_loss(&snapshot.ingredients, today),
        low_stock_count: levels.iter().filter(|level| level.low_stock).count() as u64,
        expired_count: snapshot
            .ingredients
            .iter()
            .filter(|ingredient| is_expired(ingredient, today))
            .count() as u64,
        top_selling: top_selling(&snapshot.menu, TOP_N),
        top_depleted: top_depleted(&snapshot.ingredients, &menu, &snapshot.links, TOP_N),
        daily: daily_trend(&snapshot.orders, &menu, today, TREND_DAYS, offset),
        orders_by_hour: orders_by_hour(&snapshot.orders, offset),
        revenue_by_category: revenue_by_category(&snapshot.orders, &menu),
        status_counts: status_counts(&snapshot.orders),
    }
}

/// Today's counts, with predicted demand when a forecast is at hand.
#[instrument(skip(snapshot, forecast))]
pub fn overview_summary(
    snapshot: &Snapshot,
    forecast: Option<&[ForecastEntry]>,
    today: NaiveDate,
    offset: FixedOffset,
) -> OverviewSummary {
    let menu = snapshot.menu_index();
    let todays = orders_on(&snapshot.orders, today, offset);
    let servings_today: i64 = todays.iter().map(|order| i64::from(order.quantity)).sum();

    let planned = forecast
        .map(|entries| entries_for_date(entries, today))
        .filter(|entries| !entries.is_empty())
        .map(|entries| totals(&entries));

    OverviewSummary {
        today,
        predicted_demand: planned.map(|(predicted, _)| predicted),
        recommended_servings: planned.map(|(_, recommended)| recommended),
        total_orders: todays.len() as u64,
        status_counts: status_counts(todays.iter().copied()),
        servings_today,
        surplus: planned.map(|(_, recommended)| (recommended - servings_today).max(0)),
        shortage: planned.map(|(_, recommended)| (servings_today - recommended).max(0)),
        revenue_today: revenue_on(&snapshot.orders, &menu, today, offset),
    }
}
