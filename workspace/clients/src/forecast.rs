use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use common::{ForecastEntry, ForecastResponse};

use crate::error::Result;
use crate::{http_client, status_error};

const SERVICE: &str = "forecast service";

/// Source of per-dish demand predictions.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_forecast(&self) -> Result<Vec<ForecastEntry>>;
}

/// Calls `GET {base_url}/predict` once per request. No retries.
#[derive(Debug, Clone)]
pub struct HttpForecastClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpForecastClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ForecastSource for HttpForecastClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_forecast(&self) -> Result<Vec<ForecastEntry>> {
        let url = format!("{}/predict", self.base_url);
        debug!("Requesting forecast from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Forecast request failed: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let err = status_error(SERVICE, response).await;
            error!("Forecast service error: {}", err);
            return Err(err);
        }

        let payload: ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to decode forecast payload: {}", e);
            e
        })?;
        debug!("Received {} forecast entries", payload.forecast.len());
        Ok(payload.forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use serde_json::json;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_forecast_decodes_entries() {
        let app = Router::new().route(
            "/predict",
            get(|| async {
                Json(json!({"forecast": [
                    {"dish": "Idli", "date": "2025-03-10", "weekday": "Monday",
                     "predicted": 42, "min": 35, "max": 50,
                     "recommended_servings": 46, "confidence": "high"}
                ]}))
            }),
        );
        let base = spawn(app).await;
        let client = HttpForecastClient::new(format!("{}/", base), Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), base);

        let entries = client.fetch_forecast().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dish, "Idli");
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(entries[0].recommended_servings, 46);
    }

    #[tokio::test]
    async fn test_fetch_forecast_reports_status() {
        let app = Router::new().route(
            "/predict",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model warming up") }),
        );
        let base = spawn(app).await;
        let client = HttpForecastClient::new(base, Duration::from_secs(5)).unwrap();

        match client.fetch_forecast().await {
            Err(ClientError::Status { status, body, .. }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "model warming up");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_forecast_times_out() {
        let app = Router::new().route(
            "/predict",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"forecast": []}))
            }),
        );
        let base = spawn(app).await;
        let client = HttpForecastClient::new(base, Duration::from_millis(100)).unwrap();
        assert!(matches!(client.fetch_forecast().await, Err(ClientError::Http(_))));
    }
}
