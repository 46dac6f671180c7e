//! Location the station reports for

use serde::{Deserialize, Serialize};

use crate::error::StationError;

/// Location coordinates and display label
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Label shown in the header band
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Reject coordinates outside the valid WGS84 ranges
    pub fn validate(&self) -> Result<(), StationError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(StationError::config(format!(
                "Invalid coordinates {}: latitude must be -90 to 90, longitude must be -180 to 180",
                self.format_coordinates()
            )));
        }
        Ok(())
    }
}
