//! Weather Underground personal weather station client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{FetchError, ObservationSource, get_json};
use crate::models::CurrentConditions;

pub const DEFAULT_BASE_URL: &str = "https://api.weather.com";

/// The API reports pressure in inHg with `units=e`
const INHG_TO_HPA: f32 = 33.8639;

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    #[serde(default)]
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    humidity: Option<f32>,
    winddir: Option<u16>,
    /// Absent or null while the station is offline
    #[serde(default)]
    imperial: Option<Imperial>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Imperial {
    temp: Option<f32>,
    heat_index: Option<f32>,
    wind_chill: Option<f32>,
    pressure: Option<f32>,
    wind_speed: Option<f32>,
    wind_gust: Option<f32>,
    precip_rate: Option<f32>,
    precip_total: Option<f32>,
}

impl From<Observation> for CurrentConditions {
    fn from(obs: Observation) -> Self {
        let imperial = obs.imperial.unwrap_or_default();
        Self {
            temperature: imperial.temp,
            heat_index: imperial.heat_index,
            wind_chill: imperial.wind_chill,
            humidity: obs.humidity,
            pressure: imperial.pressure.map(|inhg| inhg * INHG_TO_HPA),
            wind_speed: imperial.wind_speed,
            wind_gust: imperial.wind_gust,
            wind_direction: obs.winddir.map(|deg| deg % 360),
            rain_rate: imperial.precip_rate,
            rain_total: imperial.precip_total,
        }
    }
}

fn first_observation(response: ObservationResponse) -> Result<CurrentConditions, FetchError> {
    response
        .observations
        .into_iter()
        .next()
        .map(CurrentConditions::from)
        .ok_or_else(|| FetchError::Malformed("response contains no observations".into()))
}

#[derive(Debug, Clone)]
pub struct UndergroundClient {
    client: Client,
    base_url: String,
    station_id: String,
    api_key: String,
}

impl UndergroundClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        station_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            station_id: station_id.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ObservationSource for UndergroundClient {
    #[instrument(skip(self), fields(station = %self.station_id))]
    async fn current_conditions(&self) -> Result<CurrentConditions, FetchError> {
        let url = format!("{}/v2/pws/observations/current", self.base_url);
        let request = self.client.get(url).query(&[
            ("stationId", self.station_id.as_str()),
            ("format", "json"),
            ("units", "e"),
            ("apiKey", self.api_key.as_str()),
        ]);
        let current = first_observation(get_json(request).await?)?;
        debug!(temperature = ?current.temperature, "Fetched station observation");
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<CurrentConditions, FetchError> {
        let response: ObservationResponse = serde_json::from_str(body).unwrap();
        first_observation(response)
    }

    #[test]
    fn test_full_observation() {
        let current = parse(
            r#"{"observations": [{
                "stationID": "KVANORFO123",
                "humidity": 63,
                "winddir": 225,
                "imperial": {
                    "temp": 55, "heatIndex": 58, "dewpt": 43, "windChill": 50,
                    "windSpeed": 7, "windGust": 12, "pressure": 30.01,
                    "precipRate": 0.0, "precipTotal": 0.12, "elev": 10
                }
            }]}"#,
        )
        .unwrap();
        assert_eq!(current.temperature, Some(55.0));
        assert_eq!(current.feels_like(), Some(58.0));
        assert_eq!(current.wind_direction, Some(225));
        assert_eq!(current.format_pressure(), "Pressure 1016 hPa");
        assert_eq!(current.format_rain_total(), "Total 0.12 in");
    }

    #[test]
    fn test_null_fields_become_unavailable() {
        let current = parse(
            r#"{"observations": [{
                "humidity": null,
                "winddir": null,
                "imperial": {"temp": 30, "heatIndex": null, "windChill": 22, "windGust": null}
            }]}"#,
        )
        .unwrap();
        assert_eq!(current.humidity, None);
        assert_eq!(current.wind_direction, None);
        assert_eq!(current.wind_gust, None);
        assert_eq!(current.feels_like(), Some(22.0));
        assert_eq!(current.format_humidity(), "Humidity N/A");
    }

    #[test]
    fn test_offline_station_reports_every_reading_unavailable() {
        for body in [
            r#"{"observations": [{"humidity": 71, "winddir": 180, "imperial": null}]}"#,
            r#"{"observations": [{"humidity": 71, "winddir": 180}]}"#,
        ] {
            let current = parse(body).unwrap();
            assert_eq!(current.humidity, Some(71.0));
            assert_eq!(current.temperature, None);
            assert_eq!(current.pressure, None);
            assert_eq!(current.format_temperature(), "N/A");
        }
    }

    #[test]
    fn test_empty_observations_are_malformed() {
        assert!(matches!(parse(r#"{"observations": []}"#), Err(FetchError::Malformed(_))));
        assert!(matches!(parse("{}"), Err(FetchError::Malformed(_))));
    }
}
