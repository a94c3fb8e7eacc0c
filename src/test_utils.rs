#[cfg(test)]
pub mod test_utils {
    use crate::config::{AppConfig, ForecastSettings, GenAiSettings};
    use crate::realtime::ChangeFeed;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use async_trait::async_trait;
    use axum::Router;
    use chrono::{NaiveDate, NaiveDateTime};
    use clients::{ClientError, ForecastSource, TextGenerator};
    use common::{Confidence, ForecastEntry};
    use migration::{Migrator, MigratorTrait};
    use model::entities::{ingredient, menu, order, student};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Forecast source answering from memory; `None` simulates an outage.
    #[derive(Debug, Clone, Default)]
    pub struct StubForecast {
        pub entries: Option<Vec<ForecastEntry>>,
    }

    #[async_trait]
    impl ForecastSource for StubForecast {
        async fn fetch_forecast(&self) -> clients::Result<Vec<ForecastEntry>> {
            self.entries.clone().ok_or(ClientError::Status {
                service: "forecast service",
                status: 503,
                body: "offline".to_string(),
            })
        }
    }

    /// Text generator returning a canned reply; `None` simulates an outage.
    #[derive(Debug, Clone, Default)]
    pub struct StubText {
        pub reply: Option<String>,
    }

    #[async_trait]
    impl TextGenerator for StubText {
        async fn generate(&self, _prompt: &str) -> clients::Result<String> {
            self.reply.clone().ok_or(ClientError::EmptyReply("text generation service"))
        }
    }

    pub fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).expect("valid test date")
    }

    pub fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, 0, 0).expect("valid test time")
    }

    pub fn forecast_entry(date: NaiveDate, dish: &str, predicted: i64, recommended: i64) -> ForecastEntry {
        ForecastEntry {
            date,
            dish: dish.to_string(),
            predicted,
            recommended_servings: recommended,
            confidence: Confidence::High,
            weekday: None,
            min: None,
            max: None,
        }
    }

    pub fn test_config() -> AppConfig {
        AppConfig {
            forecast: ForecastSettings {
                base_url: "http://127.0.0.1:9".to_string(),
                timeout_secs: 1,
            },
            genai: GenAiSettings {
                base_url: "http://127.0.0.1:9".to_string(),
                model: "stub".to_string(),
                api_key: String::new(),
                timeout_secs: 1,
            },
            profit_margin: 0.30,
            utc_offset_minutes: 0,
        }
    }

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// AppState over a fresh database with the given service stubs.
    pub async fn setup_test_app_state_with(forecast: StubForecast, text: StubText) -> AppState {
        init_test_tracing();
        AppState {
            db: setup_test_db().await,
            changes: ChangeFeed::new(),
            forecast: Arc::new(forecast),
            text: Arc::new(text),
            config: Arc::new(test_config()),
        }
    }

    /// AppState whose forecast and text services are both unavailable.
    pub async fn setup_test_app_state() -> AppState {
        setup_test_app_state_with(StubForecast::default(), StubText::default()).await
    }

    /// Install a stderr subscriber once per test binary.
    ///
    /// The level comes from `RUST_LOG` (ERROR, WARN, INFO, DEBUG or TRACE)
    /// and defaults to WARN.
    fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        // Another test may have installed it already.
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        create_router(setup_test_app_state().await)
    }

    pub async fn insert_menu_item(
        db: &DatabaseConnection,
        name: &str,
        price: i64,
        sold_today: i32,
        category: &str,
        created_at: NaiveDateTime,
    ) -> menu::Model {
        menu::ActiveModel {
            created_at: Set(created_at),
            item: Set(name.to_string()),
            price: Set(Decimal::new(price, 0)),
            availability: Set(true),
            category: Set(category.to_string()),
            nutritional_info: Set(None),
            daily_demand: Set(Some(50)),
            sold_today: Set(sold_today),
            image_url: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert menu item")
    }

    pub async fn insert_ingredient(
        db: &DatabaseConnection,
        name: &str,
        quantity: i64,
        reorder_level: i64,
        expiry_date: Option<NaiveDate>,
    ) -> ingredient::Model {
        ingredient::ActiveModel {
            name: Set(name.to_string()),
            quantity: Set(Decimal::new(quantity, 0)),
            reorder_level: Set(Decimal::new(reorder_level, 0)),
            expiry_date: Set(expiry_date),
            cost_per_unit: Set(Decimal::new(10, 0)),
            unit: Set(Some("kg".to_string())),
            remaining_ingredient: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert ingredient")
    }

    pub async fn insert_order(
        db: &DatabaseConnection,
        menu_id: i32,
        quantity: i32,
        amount: Option<Decimal>,
        created_at: NaiveDateTime,
    ) -> order::Model {
        order::ActiveModel {
            created_at: Set(created_at),
            quantity: Set(quantity),
            amount: Set(amount),
            status: Set(order::OrderStatus::Pending),
            payment_method: Set(Some("cash".to_string())),
            expected_time: Set(None),
            menu_id: Set(Some(menu_id)),
            student_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert order")
    }

    pub async fn insert_student(db: &DatabaseConnection, name: &str) -> student::Model {
        student::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(at(day(1), 8)),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to insert student")
    }
}
