//! Data models for the weather station
//!
//! - Location: where the station is and what the header calls it
//! - Weather: current conditions from the personal weather station
//! - Forecast: the 7-day outlook
//! - Snapshot: everything one render cycle needs, assembled once per poll

pub mod forecast;
pub mod location;
pub mod snapshot;
pub mod weather;

pub use forecast::{FORECAST_DAYS, Forecast, ForecastDay, ForecastError};
pub use location::Location;
pub use snapshot::WeatherSnapshot;
pub use weather::{CurrentConditions, UNAVAILABLE, format_reading};
