use chrono::NaiveDate;
use common::{DashboardSummary, ForecastView, OverviewSummary, SuggestionSet};

use super::get;

pub async fn get_dashboard() -> Result<DashboardSummary, String> {
    get("/dashboard").await
}

pub async fn get_overview() -> Result<OverviewSummary, String> {
    get("/overview").await
}

/// Forecast for `date`, or the server's default date when `None`.
pub async fn get_forecast(date: Option<NaiveDate>) -> Result<ForecastView, String> {
    match date {
        Some(date) => get(&format!("/forecast?date={}", date.format("%Y-%m-%d"))).await,
        None => get("/forecast").await,
    }
}

/// Freshly generated suggestions; every call asks the text service again.
pub async fn get_suggestions() -> Result<SuggestionSet, String> {
    get("/suggestions").await
}
