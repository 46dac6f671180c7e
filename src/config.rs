//! Configuration management for the weather station
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates every setting before the station starts.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::StationError;
use crate::models::Location;
use crate::render::Layout;
use crate::weather::{open_meteo, underground};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Where the station is; the name is shown in the header
    pub location: Location,
    /// Weather Underground station credentials
    #[serde(default)]
    pub station: StationApiConfig,
    /// Open-Meteo forecast settings
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// HTTP settings shared by all fetches
    #[serde(default)]
    pub network: NetworkConfig,
    /// Panel size and preview output
    #[serde(default)]
    pub display: DisplayConfig,
    /// Icon asset location
    #[serde(default)]
    pub icons: IconsConfig,
    /// Poll interval
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather Underground API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationApiConfig {
    /// Personal weather station identifier, e.g. `KVANORFO123`
    #[serde(default)]
    pub station_id: String,
    /// API key issued for the station
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the observations API
    #[serde(default = "default_station_base_url")]
    pub base_url: String,
}

/// Open-Meteo API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
}

/// HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Panel width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Panel height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Where the preview sink writes its PNG
    #[serde(default = "default_preview_path")]
    pub preview_path: String,
}

/// Icon settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Directory holding `{icon-name}.png` or `.bmp` assets
    #[serde(default = "default_icon_directory")]
    pub directory: String,
}

/// Poll schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between the start of two cycles
    #[serde(default = "default_interval")]
    pub interval_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_station_base_url() -> String {
    underground::DEFAULT_BASE_URL.to_string()
}

fn default_forecast_base_url() -> String {
    open_meteo::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    480
}

fn default_preview_path() -> String {
    "wxpaper-preview.png".to_string()
}

fn default_icon_directory() -> String {
    "icons".to_string()
}

fn default_interval() -> u32 {
    900
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Longest allowed request timeout
const MAX_TIMEOUT_SECONDS: u32 = 120;
/// Shortest allowed poll interval
const MIN_INTERVAL_SECONDS: u32 = 60;

impl Default for StationApiConfig {
    fn default() -> Self {
        Self {
            station_id: String::new(),
            api_key: String::new(),
            base_url: default_station_base_url(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_base_url(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            preview_path: default_preview_path(),
        }
    }
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            directory: default_icon_directory(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            location: Location::new("Weather Station", 0.0, 0.0),
            station: StationApiConfig::default(),
            forecast: ForecastConfig::default(),
            network: NetworkConfig::default(),
            display: DisplayConfig::default(),
            icons: IconsConfig::default(),
            schedule: ScheduleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StationConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WXPAPER_SECTION__KEY, e.g. WXPAPER_STATION__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("WXPAPER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: StationConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wxpaper").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.station.base_url.is_empty() {
            self.station.base_url = default_station_base_url();
        }
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.network.timeout_seconds == 0 {
            self.network.timeout_seconds = default_timeout();
        }
        if self.display.width == 0 {
            self.display.width = default_width();
        }
        if self.display.height == 0 {
            self.display.height = default_height();
        }
        if self.display.preview_path.is_empty() {
            self.display.preview_path = default_preview_path();
        }
        if self.icons.directory.is_empty() {
            self.icons.directory = default_icon_directory();
        }
        if self.schedule.interval_seconds == 0 {
            self.schedule.interval_seconds = default_interval();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        self.location.validate()?;
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_credentials(&self) -> crate::Result<()> {
        if self.station.station_id.trim().is_empty() {
            return Err(StationError::config(
                "Weather station id is required. Set station.station_id or WXPAPER_STATION__STATION_ID.",
            ));
        }
        if self.station.api_key.trim().is_empty() {
            return Err(StationError::config(
                "Weather station API key is required. Set station.api_key or WXPAPER_STATION__API_KEY.",
            ));
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> crate::Result<()> {
        if self.network.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(StationError::config(format!(
                "Request timeout cannot exceed {MAX_TIMEOUT_SECONDS} seconds"
            )));
        }

        if self.schedule.interval_seconds < MIN_INTERVAL_SECONDS {
            return Err(StationError::config(format!(
                "Poll interval must be at least {MIN_INTERVAL_SECONDS} seconds"
            )));
        }

        let (width, height) = (self.display.width, self.display.height);
        if !Layout::new(width, height).fits() {
            return Err(StationError::config(format!(
                "Display {width}x{height} is too small for the layout"
            )));
        }

        Ok(())
    }

    fn validate_string_values(&self) -> crate::Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(StationError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(StationError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        for (name, url) in [
            ("Station", &self.station.base_url),
            ("Forecast", &self.forecast.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StationError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.network.timeout_seconds))
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.schedule.interval_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid() -> StationConfig {
        let mut config = StationConfig::default();
        config.station.station_id = "KVANORFO123".to_string();
        config.station.api_key = "0123456789abcdef".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = StationConfig::default();
        assert_eq!(config.station.base_url, "https://api.weather.com");
        assert_eq!(config.forecast.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.network.timeout_seconds, 10);
        assert_eq!((config.display.width, config.display.height), (800, 480));
        assert_eq!(config.schedule.interval_seconds, 900);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.interval(), Duration::from_secs(900));
    }

    #[test]
    fn test_credentials_are_required() {
        let result = StationConfig::default().validate();
        assert!(matches!(result, Err(StationError::Config { .. })));
        assert!(result.unwrap_err().to_string().contains("station id"));

        let mut config = valid();
        config.station.api_key = "  ".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("API key"));

        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_numeric_ranges() {
        let mut config = valid();
        config.network.timeout_seconds = 121;
        assert!(config.validate().unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = valid();
        config.schedule.interval_seconds = 30;
        assert!(config.validate().unwrap_err().to_string().contains("at least 60"));

        let mut config = valid();
        config.display.width = 100;
        assert!(config.validate().unwrap_err().to_string().contains("too small"));
    }

    #[test]
    fn test_display_size_bounds() {
        let mut config = valid();
        (config.display.width, config.display.height) = (512, 333);
        assert!(config.validate().is_ok());

        (config.display.width, config.display.height) = (512, 332);
        assert!(config.validate().is_err());

        (config.display.width, config.display.height) = (511, 480);
        assert!(config.validate().is_err());

        (config.display.width, config.display.height) = (200, 200);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_strings() {
        let mut config = valid();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("Invalid log level"));

        let mut config = valid();
        config.logging.format = "xml".to_string();
        assert!(config.validate().unwrap_err().to_string().contains("Invalid log format"));

        let mut config = valid();
        config.forecast.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.location.latitude = 123.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_empty_values() {
        let mut config = valid();
        config.network.timeout_seconds = 0;
        config.schedule.interval_seconds = 0;
        config.logging.format = String::new();
        config.icons.directory = String::new();
        config.apply_defaults();
        assert_eq!(config.network.timeout_seconds, 10);
        assert_eq!(config.schedule.interval_seconds, 900);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.icons.directory, "icons");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[location]
name = "Norfolk, VA"
latitude = 36.85
longitude = -76.29

[station]
station_id = "KVANORFO123"
api_key = "0123456789abcdef"

[schedule]
interval_seconds = 600
"#
        )
        .unwrap();

        let config = StationConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.location.name, "Norfolk, VA");
        assert_eq!(config.station.station_id, "KVANORFO123");
        assert_eq!(config.schedule.interval_seconds, 600);
        assert_eq!(config.display.width, 800);
        assert_eq!(config.network.timeout_seconds, 10);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[location]
name = "Nowhere"
latitude = 10.0
longitude = 10.0
"#
        )
        .unwrap();

        let err = StationConfig::load_from_path(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("station id"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = StationConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("wxpaper"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
