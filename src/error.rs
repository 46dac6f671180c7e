//! Error types and handling for the weather station

use thiserror::Error;

use crate::display::SinkError;
use crate::weather::FetchError;

/// Main error type for the weather station
#[derive(Error, Debug)]
pub enum StationError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream weather data could not be fetched
    #[error("Fetch error: {source}")]
    Fetch {
        #[from]
        source: FetchError,
    },

    /// The display sink rejected a frame
    #[error("Display error: {source}")]
    Sink {
        #[from]
        source: SinkError,
    },
}

impl StationError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the loop can keep running after this error
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, StationError::Fetch { .. } | StationError::Sink { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StationError::Config { .. } => {
                "Configuration error. Please check your config file and station credentials."
                    .to_string()
            }
            StationError::Fetch { .. } => {
                "Weather data unavailable this cycle. The display keeps its last image.".to_string()
            }
            StationError::Sink { .. } => {
                "The display could not be updated. Check the panel connection.".to_string()
            }
        }
    }
}
