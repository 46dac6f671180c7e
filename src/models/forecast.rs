//! Seven-day forecast model and factory methods

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conditions::{self, IconId, WeatherCode};

/// Number of days the forecast graph and footer are laid out for
pub const FORECAST_DAYS: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    #[error("forecast must have exactly {FORECAST_DAYS} days, got {0}")]
    WrongLength(usize),
}

/// One column of the forecast footer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    /// Three-letter weekday, e.g. `Sat`
    pub day_label: String,
    /// Short date, e.g. `03-14`
    pub date_label: String,
    /// Daily high in °F
    pub high: f32,
    /// Daily low in °F
    pub low: f32,
    pub icon: IconId,
}

impl ForecastDay {
    /// Build a day from its calendar date, deriving both labels and the icon
    #[must_use]
    pub fn new(date: NaiveDate, high: f32, low: f32, code: WeatherCode) -> Self {
        Self {
            day_label: date.format("%a").to_string(),
            date_label: date.format("%m-%d").to_string(),
            high,
            low,
            icon: conditions::map(code),
        }
    }
}

/// Exactly seven days, in display order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Forecast {
    days: [ForecastDay; FORECAST_DAYS],
}

impl Forecast {
    pub fn new(days: Vec<ForecastDay>) -> Result<Self, ForecastError> {
        let len = days.len();
        let days: [ForecastDay; FORECAST_DAYS] =
            days.try_into().map_err(|_| ForecastError::WrongLength(len))?;
        Ok(Self { days })
    }

    #[must_use]
    pub fn days(&self) -> &[ForecastDay; FORECAST_DAYS] {
        &self.days
    }

    pub fn highs(&self) -> impl Iterator<Item = f32> + '_ {
        self.days.iter().map(|d| d.high)
    }

    pub fn lows(&self) -> impl Iterator<Item = f32> + '_ {
        self.days.iter().map(|d| d.low)
    }

    /// Lowest low and highest high across the week
    #[must_use]
    pub fn temperature_bounds(&self) -> (f32, f32) {
        let min = self.lows().fold(f32::INFINITY, f32::min);
        let max = self.highs().fold(f32::NEG_INFINITY, f32::max);
        (min, max)
    }
}

impl TryFrom<Vec<ForecastDay>> for Forecast {
    type Error = ForecastError;

    fn try_from(days: Vec<ForecastDay>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}
