//! `wxpaper` - weather station renderer for bi-color e-paper displays
//!
//! This library polls a personal weather station and the Open-Meteo forecast,
//! lays the result out as two monochrome layers (black and red), and pushes
//! them to a raster sink.

pub mod conditions;
pub mod config;
pub mod display;
pub mod error;
pub mod feels_like;
pub mod icons;
pub mod logging;
pub mod models;
pub mod render;
pub mod station;
pub mod weather;

// Re-export core types for public API
pub use conditions::{IconId, WeatherCode};
pub use config::StationConfig;
pub use display::{PngPreviewSink, RasterSink, SinkError};
pub use error::StationError;
pub use icons::{IconDirectory, IconError, IconSource};
pub use models::{CurrentConditions, Forecast, ForecastDay, Location, WeatherSnapshot};
pub use render::{LayoutEngine, MonoLayer, RenderedFrame};
pub use station::{CycleOutcome, Station};
pub use weather::{FetchError, ForecastSource, ObservationSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, StationError>;
