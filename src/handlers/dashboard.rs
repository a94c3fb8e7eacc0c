use crate::schemas::{configured_margin, configured_offset, database_error, ApiError, ApiResponse, AppState, ErrorResponse, TodayQuery};
use axum::{
    extract::{Query, State},
    response::Json,
};
use common::{DashboardSummary, OverviewSummary};
use compute::dashboard::{dashboard_summary, overview_summary};
use compute::Snapshot;
use sea_orm::DatabaseConnection;
use tracing::{debug, error, info, instrument, trace, warn};

async fn load_snapshot(db: &DatabaseConnection) -> Result<Snapshot, ApiError> {
    Snapshot::load(db).await.map_err(|e| {
        error!("Failed to load rows for analytics: {}", e);
        database_error("Failed to load analytics data")
    })
}

/// Sales, stock and order analytics for the dashboard
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "analytics",
    params(TodayQuery),
    responses(
        (status = 200, description = "Dashboard summary computed", body = ApiResponse<DashboardSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    trace!("Entering get_dashboard function");
    let offset = configured_offset(&state.config)?;
    let today = compute::today_or_now(query.today, offset);
    let margin = configured_margin(&state.config)?;
    debug!("Computing dashboard for {} with margin {}", today, margin);

    let snapshot = load_snapshot(&state.db).await?;
    let summary = dashboard_summary(&snapshot, today, margin, offset);

    info!(
        "Dashboard computed: {} orders, revenue today {}",
        summary.total_orders, summary.revenue_today
    );
    Ok(Json(ApiResponse::ok(summary, "Dashboard computed successfully")))
}

/// Today's order counts alongside predicted demand
///
/// The forecast is optional here: when the forecasting service is down the
/// overview is still returned with the prediction fields empty.
#[utoipa::path(
    get,
    path = "/api/v1/overview",
    tag = "analytics",
    params(TodayQuery),
    responses(
        (status = 200, description = "Overview computed", body = ApiResponse<OverviewSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_overview(
    State(state): State<AppState>,
    Query(query): Query<TodayQuery>,
) -> Result<Json<ApiResponse<OverviewSummary>>, ApiError> {
    trace!("Entering get_overview function");
    let offset = configured_offset(&state.config)?;
    let today = compute::today_or_now(query.today, offset);

    let snapshot = load_snapshot(&state.db).await?;
    let forecast = match state.forecast.fetch_forecast().await {
        Ok(entries) => {
            debug!("Fetched {} forecast entries for overview", entries.len());
            Some(entries)
        }
        Err(e) => {
            warn!("Forecast unavailable for overview: {}", e);
            None
        }
    };

    let summary = overview_summary(&snapshot, forecast.as_deref(), today, offset);
    info!(
        "Overview computed: {} orders today, predicted demand {:?}",
        summary.total_orders, summary.predicted_demand
    );
    Ok(Json(ApiResponse::ok(summary, "Overview computed successfully")))
}
