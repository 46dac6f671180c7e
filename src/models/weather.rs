//! Current conditions model and display methods

use serde::{Deserialize, Serialize};

use crate::feels_like;

/// Placeholder rendered wherever a reading is unavailable
pub const UNAVAILABLE: &str = "N/A";

/// Format an optional reading, falling back to [`UNAVAILABLE`]
#[must_use]
pub fn format_reading(value: Option<f32>, precision: usize, unit: &str) -> String {
    match value {
        Some(v) => {
            let text = format!("{v:.precision$}");
            // Values that round to zero keep no sign
            let text = match text.strip_prefix('-') {
                Some(magnitude) if magnitude.bytes().all(|b| matches!(b, b'0' | b'.')) => magnitude.to_string(),
                _ => text,
            };
            format!("{text}{unit}")
        }
        None => UNAVAILABLE.to_string(),
    }
}

/// Observation from the personal weather station, imperial units.
///
/// Every reading is optional: a station that stops reporting one sensor still
/// produces a usable record.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in °F
    pub temperature: Option<f32>,
    /// Heat index in °F
    pub heat_index: Option<f32>,
    /// Wind chill in °F
    pub wind_chill: Option<f32>,
    /// Relative humidity in %
    pub humidity: Option<f32>,
    /// Barometric pressure in hPa
    pub pressure: Option<f32>,
    /// Sustained wind speed in mph
    pub wind_speed: Option<f32>,
    /// Wind gust speed in mph
    pub wind_gust: Option<f32>,
    /// Wind direction in degrees (0-359, where 0 is north)
    pub wind_direction: Option<u16>,
    /// Rain rate in in/hr
    pub rain_rate: Option<f32>,
    /// Accumulated rain today in inches
    pub rain_total: Option<f32>,
}

impl CurrentConditions {
    /// Perceived temperature, see [`feels_like::compute`]
    #[must_use]
    pub fn feels_like(&self) -> Option<f32> {
        feels_like::compute(self.temperature, self.heat_index, self.wind_chill)
    }

    /// Temperature rounded to whole degrees, without unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format_reading(self.temperature, 0, "")
    }

    /// Format perceived temperature with label
    #[must_use]
    pub fn format_feels_like(&self) -> String {
        format!("Feels like {}", format_reading(self.feels_like(), 0, "°F"))
    }

    /// Format wind speed and gust information
    #[must_use]
    pub fn format_wind(&self) -> (String, String) {
        (
            format!("Wind {}", format_reading(self.wind_speed, 0, " mph")),
            format!("Gust {}", format_reading(self.wind_gust, 0, " mph")),
        )
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("Humidity {}", format_reading(self.humidity, 0, "%"))
    }

    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("Pressure {}", format_reading(self.pressure, 0, " hPa"))
    }

    #[must_use]
    pub fn format_rain_rate(&self) -> String {
        format!("Rain {}", format_reading(self.rain_rate, 2, " in/hr"))
    }

    #[must_use]
    pub fn format_rain_total(&self) -> String {
        format!("Total {}", format_reading(self.rain_total, 2, " in"))
    }
}
