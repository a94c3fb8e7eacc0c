//! HTTP clients for the external services the canteen relies on: the demand
//! forecasting service and the generative-text API used for suggestions.
//! Each is exposed through a trait so the server can swap in stubs.

pub mod error;
pub mod forecast;
pub mod genai;

pub use error::{ClientError, Result};
pub use forecast::{ForecastSource, HttpForecastClient};
pub use genai::{GeminiClient, TextGenerator};

use std::time::Duration;

/// Builds the shared reqwest client with a request timeout.
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("canteen/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?)
}

/// Reads a failed response into a `ClientError::Status`.
async fn status_error(service: &'static str, response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClientError::Status { service, status, body }
}
