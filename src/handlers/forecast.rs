use crate::schemas::{api_error, configured_offset, database_error, ApiError, ApiResponse, AppState, ErrorResponse, ForecastQuery};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::ForecastView;
use compute::forecast::forecast_view;
use model::entities::menu;
use sea_orm::EntityTrait;
use tracing::{debug, error, info, instrument, trace};

/// Demand forecast for one date, deduplicated by dish and matched against the menu
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    params(ForecastQuery),
    responses(
        (status = 200, description = "Forecast retrieved", body = ApiResponse<ForecastView>),
        (status = 502, description = "Forecasting service unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ApiResponse<ForecastView>>, ApiError> {
    trace!("Entering get_forecast function");
    let today = compute::today_or_now(query.today, configured_offset(&state.config)?);

    let entries = match state.forecast.fetch_forecast().await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to fetch forecast: {}", e);
            return Err(api_error(
                StatusCode::BAD_GATEWAY,
                "FORECAST_SERVICE_UNAVAILABLE",
                "Forecasting service unavailable",
            ));
        }
    };

    let menu_items = match menu::Entity::find().all(&state.db).await {
        Ok(items) => items,
        Err(db_error) => {
            error!("Failed to retrieve menu items for forecast: {}", db_error);
            return Err(database_error("Failed to retrieve menu items"));
        }
    };
    debug!("Merging {} forecast entries with {} menu items", entries.len(), menu_items.len());

    let view = forecast_view(&entries, query.date, today, &menu_items);
    info!(
        "Forecast for {:?}: {} dishes, {} predicted servings",
        view.selected_date,
        view.entries.len(),
        view.total_predicted
    );
    Ok(Json(ApiResponse::ok(view, "Forecast retrieved successfully")))
}
