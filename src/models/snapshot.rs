//! Everything one render cycle needs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{CurrentConditions, Forecast};
use crate::conditions::{self, IconId, WeatherCode};

/// Fully populated weather picture for one poll cycle.
///
/// All parts are required; a cycle that could not fetch one of them never
/// builds a snapshot and therefore never renders.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Forecast,
    /// Condition code for right now, drives the large icon
    pub condition: WeatherCode,
    /// Local wall-clock time of the poll, shown in the header
    pub captured_at: NaiveDateTime,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn new(
        current: CurrentConditions,
        forecast: Forecast,
        condition: WeatherCode,
        captured_at: NaiveDateTime,
    ) -> Self {
        Self {
            current,
            forecast,
            condition,
            captured_at,
        }
    }

    /// Assemble from independently fetched parts; `None` if any is missing
    #[must_use]
    pub fn assemble(
        current: Option<CurrentConditions>,
        forecast: Option<Forecast>,
        condition: Option<WeatherCode>,
        captured_at: NaiveDateTime,
    ) -> Option<Self> {
        Some(Self::new(current?, forecast?, condition?, captured_at))
    }

    #[must_use]
    pub fn current_icon(&self) -> IconId {
        conditions::map(self.condition)
    }

    /// Header timestamp, e.g. `Fri 03-14 09:45`
    #[must_use]
    pub fn format_timestamp(&self) -> String {
        self.captured_at.format("%a %m-%d %H:%M").to_string()
    }
}
