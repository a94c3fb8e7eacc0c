use crate::handlers::{
    dashboard::{get_dashboard, get_overview},
    forecast::get_forecast,
    health::health_check,
    ingredients::{create_ingredient, get_ingredients, update_ingredient},
    menu::{create_menu_item, get_menu, update_menu_item},
    orders::{create_order, get_orders, update_order_status},
    realtime::stream_changes,
    students::{create_student, get_students},
    suggestions::get_suggestions,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Menu routes
        .route("/api/v1/menu", get(get_menu).post(create_menu_item))
        .route("/api/v1/menu/:menu_id", put(update_menu_item))
        // Stock routes
        .route("/api/v1/ingredients", get(get_ingredients).post(create_ingredient))
        .route("/api/v1/ingredients/:ingredient_id", put(update_ingredient))
        // Order routes
        .route("/api/v1/orders", get(get_orders).post(create_order))
        .route("/api/v1/orders/:order_id/status", put(update_order_status))
        .route("/api/v1/students", get(get_students).post(create_student))
        // Analytics routes
        .route("/api/v1/dashboard", get(get_dashboard))
        .route("/api/v1/overview", get(get_overview))
        .route("/api/v1/forecast", get(get_forecast))
        .route("/api/v1/suggestions", get(get_suggestions))
        // Change events
        .route("/api/v1/realtime/:table", get(stream_changes))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // The metrics recorder is process-global, so tests build routers without it.
    #[cfg(not(test))]
    let router = {
        let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();
        router
            .route("/metrics", get(move || async move { metric_handle.render() }))
            .layer(prometheus_layer)
    };

    router
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
