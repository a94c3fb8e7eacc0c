//! View-level computations for the canteen dashboard: revenue and stock
//! aggregates, forecast selection, and the suggestion prompt/reply round trip.

pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod sales;
pub mod snapshot;
pub mod stock;
pub mod suggestions;

#[cfg(test)]
mod testing;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;

pub use snapshot::Snapshot;

/// Number of entries in top-N rankings.
pub const TOP_N: usize = 5;

/// Length of the daily trend window.
pub const TREND_DAYS: i64 = 7;

/// Assumed share of revenue kept as profit when none is configured.
pub const DEFAULT_PROFIT_MARGIN: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Returns the provided date as "today", or the current date at the
/// canteen's UTC offset if none is provided.
pub fn today_or_now(today: Option<NaiveDate>, offset: FixedOffset) -> NaiveDate {
    today.unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive())
}

/// Wall-clock time at `offset` for a stored UTC timestamp.
pub fn local_time(utc: NaiveDateTime, offset: FixedOffset) -> NaiveDateTime {
    offset.from_utc_datetime(&utc).naive_local()
}
