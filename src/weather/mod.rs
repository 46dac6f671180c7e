//! Upstream weather data
//!
//! Two sources feed a render cycle: the personal weather station
//! ([`underground`]) for current observations, and Open-Meteo ([`open_meteo`])
//! for the daily forecast and the current condition code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::conditions::WeatherCode;
use crate::models::{CurrentConditions, Forecast};

pub mod open_meteo;
pub mod underground;

pub use open_meteo::OpenMeteoClient;
pub use underground::UndergroundClient;

/// Why a fetch produced no data
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or transport failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// The body was not the expected shape
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Current observations from the local station
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn current_conditions(&self) -> Result<CurrentConditions, FetchError>;
}

/// Daily forecast and current condition code for the station's location
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn daily_forecast(&self) -> Result<Forecast, FetchError>;

    async fn current_code(&self) -> Result<WeatherCode, FetchError>;
}

/// HTTP client shared by both sources; every request is bounded by `timeout`
pub fn http_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("wxpaper/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::Request)
}

/// Send a request and decode its JSON body, classifying each failure
pub(crate) async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FetchError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))
}
