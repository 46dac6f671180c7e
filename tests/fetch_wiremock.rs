//! Fetch clients against a mock HTTP server
//!
//! Covers the success path and each failure class: transport, HTTP status and
//! malformed payloads.

use std::time::Duration;

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};
use wxpaper::{
    FetchError, ForecastSource, IconId, Location, ObservationSource, WeatherCode,
    weather::{OpenMeteoClient, UndergroundClient, http_client},
};

fn observation_response() -> serde_json::Value {
    serde_json::json!({
        "observations": [{
            "stationID": "KTEST1",
            "obsTimeLocal": "2025-03-14 09:45:00",
            "humidity": 63,
            "winddir": 225,
            "imperial": {
                "temp": 55,
                "heatIndex": 58,
                "dewpt": 43,
                "windChill": 50,
                "windSpeed": 7,
                "windGust": 12,
                "pressure": 30.01,
                "precipRate": 0.0,
                "precipTotal": 0.12,
                "elev": 10
            }
        }]
    })
}

fn daily_response(days: usize) -> serde_json::Value {
    let dates: Vec<String> = (0..days).map(|d| format!("2025-03-{:02}", 14 + d)).collect();
    let codes = [0, 2, 63, 73, 95, 45, 1, 3][..days].to_vec();
    let highs = [55.0, 60.0, 58.0, 52.0, 65.0, 70.0, 75.0, 71.0][..days].to_vec();
    let lows = [40.0, 45.0, 42.0, 38.0, 50.0, 55.0, 60.0, 58.0][..days].to_vec();
    serde_json::json!({
        "latitude": 36.85,
        "longitude": -76.29,
        "timezone": "America/New_York",
        "daily_units": {"temperature_2m_max": "°F"},
        "daily": {
            "time": dates,
            "weather_code": codes,
            "temperature_2m_max": highs,
            "temperature_2m_min": lows,
        }
    })
}

fn underground(server: &MockServer) -> UndergroundClient {
    let client = http_client(Duration::from_secs(5)).unwrap();
    UndergroundClient::new(client, server.uri(), "KTEST1", "secret-key")
}

fn open_meteo(server: &MockServer, timeout: Duration) -> OpenMeteoClient {
    let client = http_client(timeout).unwrap();
    OpenMeteoClient::new(client, server.uri(), Location::new("Norfolk, VA", 36.85, -76.29))
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Weather Underground
// ============================================================================

#[tokio::test]
async fn test_observation_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/pws/observations/current"))
        .and(query_param("stationId", "KTEST1"))
        .and(query_param("units", "e"))
        .and(query_param("format", "json"))
        .and(query_param("apiKey", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observation_response()))
        .expect(1)
        .mount(&server)
        .await;

    let current = underground(&server).current_conditions().await.unwrap();
    assert_eq!(current.temperature, Some(55.0));
    assert_eq!(current.feels_like(), Some(58.0));
    assert_eq!(current.wind_direction, Some(225));
    assert_eq!(current.format_pressure(), "Pressure 1016 hPa");
}

#[tokio::test]
async fn test_observation_http_error() {
    let server = MockServer::start().await;
    mount(&server, "/v2/pws/observations/current", ResponseTemplate::new(401)).await;

    let err = underground(&server).current_conditions().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(401)), "got {err:?}");
}

#[tokio::test]
async fn test_observation_without_records_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v2/pws/observations/current",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"observations": []})),
    )
    .await;

    let err = underground(&server).current_conditions().await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn test_observation_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/v2/pws/observations/current",
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let err = underground(&server).current_conditions().await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");
}

// ============================================================================
// Open-Meteo
// ============================================================================

#[tokio::test]
async fn test_daily_forecast_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "36.85"))
        .and(query_param("longitude", "-76.29"))
        .and(query_param("daily", "weather_code,temperature_2m_max,temperature_2m_min"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .and(query_param("forecast_days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_response(7)))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = open_meteo(&server, Duration::from_secs(5))
        .daily_forecast()
        .await
        .unwrap();
    let days = forecast.days();
    assert_eq!(days[0].day_label, "Fri");
    assert_eq!(days[0].date_label, "03-14");
    assert_eq!(days[2].icon, IconId::Rain);
    assert_eq!(days[3].icon, IconId::Snow);
    assert_eq!(days[4].icon, IconId::Thunderstorm);
    assert_eq!(days[5].icon, IconId::Na);
    assert_eq!(forecast.temperature_bounds(), (38.0, 75.0));
}

#[tokio::test]
async fn test_daily_forecast_wrong_day_count() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(daily_response(8)),
    )
    .await;

    let err = open_meteo(&server, Duration::from_secs(5))
        .daily_forecast()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");
    assert!(err.to_string().contains("got 8"));
}

#[tokio::test]
async fn test_daily_forecast_missing_section_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"latitude": 36.85})),
    )
    .await;

    let err = open_meteo(&server, Duration::from_secs(5))
        .daily_forecast()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn test_daily_forecast_server_error() {
    let server = MockServer::start().await;
    mount(&server, "/forecast", ResponseTemplate::new(503)).await;

    let err = open_meteo(&server, Duration::from_secs(5))
        .daily_forecast()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Status(503)), "got {err:?}");
}

#[tokio::test]
async fn test_current_code_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("current", "weather_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {"time": "2025-03-14T09:45", "interval": 900, "weather_code": 61}
        })))
        .mount(&server)
        .await;

    let code = open_meteo(&server, Duration::from_secs(5))
        .current_code()
        .await
        .unwrap();
    assert_eq!(code, WeatherCode(61));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    mount(
        &server,
        "/forecast",
        ResponseTemplate::new(200)
            .set_body_json(daily_response(7))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let err = open_meteo(&server, Duration::from_millis(200))
        .daily_forecast()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
}
