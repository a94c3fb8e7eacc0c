use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// How tight the forecasting service's prediction interval was.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One per-dish, per-day demand prediction as emitted by the forecasting service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub dish: String,
    #[serde(deserialize_with = "rounded_count")]
    pub predicted: i64,
    #[serde(deserialize_with = "rounded_count")]
    pub recommended_servings: i64,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    #[serde(
        default,
        deserialize_with = "rounded_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub min: Option<i64>,
    #[serde(
        default,
        deserialize_with = "rounded_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<i64>,
}

/// A serving count as the forecasting service may send it: `42` or `42.0`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireCount {
    Whole(i64),
    Fractional(f64),
}

impl WireCount {
    fn rounded<E: de::Error>(self) -> Result<i64, E> {
        match self {
            WireCount::Whole(n) => Ok(n),
            WireCount::Fractional(x) if x.is_finite() && x.abs() < i64::MAX as f64 => Ok(x.round() as i64),
            WireCount::Fractional(x) => Err(E::custom(format!("serving count out of range: {x}"))),
        }
    }
}

fn rounded_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    WireCount::deserialize(deserializer)?.rounded()
}

fn rounded_optional_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Option::<WireCount>::deserialize(deserializer)?
        .map(WireCount::rounded)
        .transpose()
}

/// Wire shape of `GET /predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastResponse {
    #[serde(default)]
    pub forecast: Vec<ForecastEntry>,
}

/// A forecast dish paired with the menu item of the same name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DemandComparison {
    pub dish: String,
    pub predicted: i64,
    pub recommended_servings: i64,
    pub confidence: Confidence,
    pub menu_id: Option<i32>,
    pub sold_today: Option<i32>,
    pub daily_demand: Option<i32>,
}

/// Forecast for a single selected date, deduplicated by dish.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastView {
    /// Distinct dates present in the forecast, ascending
    pub available_dates: Vec<NaiveDate>,
    pub selected_date: Option<NaiveDate>,
    pub entries: Vec<ForecastEntry>,
    pub total_predicted: i64,
    pub total_recommended: i64,
    pub comparisons: Vec<DemandComparison>,
}
