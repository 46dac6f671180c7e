//! Open-Meteo daily forecast and current condition code

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{FetchError, ForecastSource, get_json};
use crate::conditions::WeatherCode;
use crate::models::{FORECAST_DAYS, Forecast, ForecastDay, Location};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyData,
}

#[derive(Debug, Deserialize)]
struct DailyData {
    time: Vec<String>,
    weather_code: Vec<Option<u8>>,
    temperature_2m_max: Vec<Option<f32>>,
    temperature_2m_min: Vec<Option<f32>>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentData,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    weather_code: u8,
}

impl DailyData {
    fn into_forecast(self) -> Result<Forecast, FetchError> {
        let days = self.time.len();
        if days != FORECAST_DAYS {
            return Err(FetchError::Malformed(format!(
                "expected {FORECAST_DAYS} forecast days, got {days}"
            )));
        }
        if [
            self.weather_code.len(),
            self.temperature_2m_max.len(),
            self.temperature_2m_min.len(),
        ]
        .iter()
        .any(|&len| len != days)
        {
            return Err(FetchError::Malformed("daily series have different lengths".into()));
        }

        let entries = self
            .time
            .iter()
            .zip(self.temperature_2m_max)
            .zip(self.temperature_2m_min)
            .zip(self.weather_code)
            .map(|(((date, high), low), code)| {
                let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map_err(|e| FetchError::Malformed(format!("invalid date '{date}': {e}")))?;
                let missing = |what: &str| FetchError::Malformed(format!("missing {what} for {date}"));
                Ok(ForecastDay::new(
                    parsed,
                    high.ok_or_else(|| missing("high"))?,
                    low.ok_or_else(|| missing("low"))?,
                    WeatherCode(code.ok_or_else(|| missing("weather code"))?),
                ))
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        Forecast::new(entries).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    location: Location,
}

impl OpenMeteoClient {
    pub fn new(client: Client, base_url: impl Into<String>, location: Location) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            location,
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }

    fn coordinates(&self) -> [(&'static str, String); 2] {
        [
            ("latitude", self.location.latitude.to_string()),
            ("longitude", self.location.longitude.to_string()),
        ]
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    #[instrument(skip(self), fields(location = %self.location.name))]
    async fn daily_forecast(&self) -> Result<Forecast, FetchError> {
        let request = self
            .client
            .get(self.forecast_url())
            .query(&self.coordinates())
            .query(&[
                ("daily", DAILY_FIELDS),
                ("temperature_unit", "fahrenheit"),
                ("timezone", "auto"),
                ("forecast_days", "7"),
            ]);
        let response: DailyResponse = get_json(request).await?;
        let forecast = response.daily.into_forecast()?;
        debug!(bounds = ?forecast.temperature_bounds(), "Fetched daily forecast");
        Ok(forecast)
    }

    #[instrument(skip(self), fields(location = %self.location.name))]
    async fn current_code(&self) -> Result<WeatherCode, FetchError> {
        let request = self
            .client
            .get(self.forecast_url())
            .query(&self.coordinates())
            .query(&[("current", "weather_code")]);
        let response: CurrentResponse = get_json(request).await?;
        let code = WeatherCode(response.current.weather_code);
        debug!(%code, "Fetched current condition code");
        Ok(code)
    }
}
