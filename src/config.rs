use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use clients::{GeminiClient, HttpForecastClient};
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use sea_orm::Database;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::realtime::ChangeFeed;
use crate::schemas::AppState;

/// Settings for the demand forecasting service.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Settings for the generative-text API behind suggestions.
#[derive(Clone, Deserialize)]
pub struct GenAiSettings {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Service configuration layered from defaults, an optional `canteen.toml`
/// and `CANTEEN_*` environment variables (nested keys use `__`, for example
/// `CANTEEN_GENAI__API_KEY`).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub forecast: ForecastSettings,
    pub genai: GenAiSettings,
    /// Share of revenue counted as profit on the dashboard.
    pub profit_margin: f64,
    /// Offset of the canteen's wall clock from UTC. Decides which calendar
    /// day and hour an order counts toward.
    pub utc_offset_minutes: i32,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(Config::builder().add_source(File::with_name("canteen").required(false)))
    }

    fn load_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings = builder
            .set_default("forecast.base_url", "http://127.0.0.1:8000")?
            .set_default("forecast.timeout_secs", 30)?
            .set_default(
                "genai.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("genai.model", "gemini-1.5-flash")?
            .set_default("genai.api_key", "")?
            .set_default("genai.timeout_secs", 30)?
            .set_default("profit_margin", 0.30)?
            .set_default("utc_offset_minutes", 330)?
            .add_source(
                Environment::with_prefix("CANTEEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to assemble configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Profit margin as a decimal fraction in `0..=1`.
    pub fn margin(&self) -> Result<Decimal> {
        Ok(compute::sales::margin_from_f64(self.profit_margin)?)
    }

    /// The configured wall-clock offset; must lie strictly within one day.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("UTC offset out of range: {} minutes", self.utc_offset_minutes))
    }
}

/// Connects to the given database and builds the service clients from [`AppConfig`].
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    let config = AppConfig::load()?;
    debug!(?config, "Configuration loaded");
    // Fail fast on out-of-range settings.
    config.margin()?;
    config.utc_offset()?;

    info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    let forecast = HttpForecastClient::new(
        config.forecast.base_url.clone(),
        Duration::from_secs(config.forecast.timeout_secs),
    )?;
    let text = GeminiClient::new(
        config.genai.base_url.clone(),
        config.genai.model.clone(),
        config.genai.api_key.clone(),
        Duration::from_secs(config.genai.timeout_secs),
    )?;

    Ok(AppState {
        db,
        changes: ChangeFeed::new(),
        forecast: Arc::new(forecast),
        text: Arc::new(text),
        config: Arc::new(config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_sources() {
        let config = AppConfig::load_from(Config::builder()).unwrap();
        assert_eq!(config.forecast.timeout_secs, 30);
        assert_eq!(config.genai.model, "gemini-1.5-flash");
        assert!(config.genai.api_key.is_empty());
        assert_eq!(config.margin().unwrap(), Decimal::new(30, 2));
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 330 * 60);
    }

    #[test]
    fn utc_offset_is_validated() {
        let builder = Config::builder().set_override("utc_offset_minutes", -300).unwrap();
        let config = AppConfig::load_from(builder).unwrap();
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), -300 * 60);

        let builder = Config::builder().set_override("utc_offset_minutes", 1440).unwrap();
        let config = AppConfig::load_from(builder).unwrap();
        assert!(config.utc_offset().is_err());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let builder = Config::builder()
            .set_override("forecast.base_url", "http://forecast.local")
            .unwrap()
            .set_override("profit_margin", 0.25)
            .unwrap();
        let config = AppConfig::load_from(builder).unwrap();
        assert_eq!(config.forecast.base_url, "http://forecast.local");
        assert_eq!(config.margin().unwrap(), Decimal::new(25, 2));
    }

    #[test]
    fn out_of_range_margin_is_rejected() {
        let builder = Config::builder().set_override("profit_margin", 1.5).unwrap();
        let config = AppConfig::load_from(builder).unwrap();
        assert!(config.margin().is_err());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let builder = Config::builder()
            .set_override("genai.api_key", "secret-key")
            .unwrap();
        let config = AppConfig::load_from(builder).unwrap();
        assert!(!format!("{:?}", config).contains("secret-key"));
    }
}
