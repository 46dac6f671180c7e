//! WMO weather codes and the icons they render as

use std::fmt;

use serde::{Deserialize, Serialize};

/// WMO weather interpretation code as reported by Open-Meteo (0-99, sparse)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherCode(pub u8);

impl WeatherCode {
    /// Human-readable description, used in log lines
    #[must_use]
    pub fn description(self) -> &'static str {
        match self.0 {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow fall",
            73 => "Moderate snow fall",
            75 => "Heavy snow fall",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.description())
    }
}

/// Icons the display knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconId {
    DaySunny,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    /// Catch-all for codes without a dedicated icon
    Na,
}

impl IconId {
    pub const ALL: [IconId; 6] = [
        IconId::DaySunny,
        IconId::Cloudy,
        IconId::Rain,
        IconId::Snow,
        IconId::Thunderstorm,
        IconId::Na,
    ];

    /// Symbolic name, also the file stem of the icon asset
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            IconId::DaySunny => "day-sunny",
            IconId::Cloudy => "cloudy",
            IconId::Rain => "rain",
            IconId::Snow => "snow",
            IconId::Thunderstorm => "thunderstorm",
            IconId::Na => "na",
        }
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a weather code to its icon.
///
/// Total: anything outside the known bands falls through to [`IconId::Na`].
/// Bands are checked in ascending order and the first match wins.
#[must_use]
pub fn map(code: WeatherCode) -> IconId {
    match code.0 {
        0 => IconId::DaySunny,
        1..=3 => IconId::Cloudy,
        51..=55 => IconId::Rain,
        61..=65 => IconId::Rain,
        71..=75 => IconId::Snow,
        95..=99 => IconId::Thunderstorm,
        _ => IconId::Na,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, IconId::DaySunny)]
    #[case(1, IconId::Cloudy)]
    #[case(3, IconId::Cloudy)]
    #[case(51, IconId::Rain)]
    #[case(55, IconId::Rain)]
    #[case(61, IconId::Rain)]
    #[case(65, IconId::Rain)]
    #[case(71, IconId::Snow)]
    #[case(75, IconId::Snow)]
    #[case(95, IconId::Thunderstorm)]
    #[case(99, IconId::Thunderstorm)]
    fn test_banded_codes(#[case] code: u8, #[case] expected: IconId) {
        assert_eq!(map(WeatherCode(code)), expected);
    }

    #[rstest]
    #[case(4)]
    #[case(10)]
    #[case(40)]
    #[case(45)]
    #[case(56)]
    #[case(66)]
    #[case(77)]
    #[case(80)]
    #[case(94)]
    #[case(100)]
    #[case(255)]
    fn test_unbanded_codes_fall_through_to_na(#[case] code: u8) {
        assert_eq!(map(WeatherCode(code)), IconId::Na);
    }

    #[test]
    fn test_every_wmo_code_maps_to_a_known_icon() {
        for code in 0..=99u8 {
            let icon = map(WeatherCode(code));
            assert!(IconId::ALL.contains(&icon), "code {code} mapped to {icon:?}");
        }
    }

    #[test]
    fn test_icon_names_match_asset_stems() {
        let names: Vec<_> = IconId::ALL.iter().map(|icon| icon.name()).collect();
        assert_eq!(
            names,
            ["day-sunny", "cloudy", "rain", "snow", "thunderstorm", "na"]
        );
    }

    #[test]
    fn test_icon_serializes_as_kebab_name() {
        let json = serde_json::to_string(&IconId::DaySunny).unwrap();
        assert_eq!(json, "\"day-sunny\"");
    }

    #[test]
    fn test_code_display() {
        assert_eq!(WeatherCode(63).to_string(), "63 (Moderate rain)");
        assert_eq!(WeatherCode(42).description(), "Unknown");
    }
}
