use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the cold band in Fahrenheit
pub const COLD_MAX_F: f64 = 55.0;
/// Lower bound (inclusive) of the warm band in Fahrenheit
pub const WARM_MIN_F: f64 = 75.0;

/// Current weather as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Weather {
    #[serde(default, rename = "tempF", alias = "temp_f")]
    pub temp_f: Option<f64>,
    /// Free-text summary, e.g. "light rain"
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "precipChance", alias = "precip_chance")]
    pub precip_chance: Option<f64>,
}

impl Weather {
    pub fn new(temp_f: f64, summary: Option<&str>) -> Self {
        Self {
            temp_f: Some(temp_f),
            summary: summary.map(str::to_string),
            precip_chance: None,
        }
    }

    pub fn band(&self) -> Option<TemperatureBand> {
        self.temp_f.and_then(TemperatureBand::from_fahrenheit)
    }

    pub fn is_cold(&self) -> bool {
        self.band() == Some(TemperatureBand::Cold)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    Cold,
    Mild,
    Warm,
}

impl TemperatureBand {
    /// Cold at or below 55°F, warm at or above 75°F, mild in between
    ///
    /// Returns `None` for non-finite readings.
    pub fn from_fahrenheit(temp_f: f64) -> Option<Self> {
        if !temp_f.is_finite() {
            return None;
        }
        Some(if temp_f <= COLD_MAX_F {
            TemperatureBand::Cold
        } else if temp_f >= WARM_MIN_F {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Mild
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TemperatureBand::from_fahrenheit(55.0), Some(TemperatureBand::Cold));
        assert_eq!(TemperatureBand::from_fahrenheit(55.1), Some(TemperatureBand::Mild));
        assert_eq!(TemperatureBand::from_fahrenheit(74.9), Some(TemperatureBand::Mild));
        assert_eq!(TemperatureBand::from_fahrenheit(75.0), Some(TemperatureBand::Warm));
        assert_eq!(TemperatureBand::from_fahrenheit(f64::NAN), None);
    }

    #[test]
    fn test_weather_deserializes_temp_f() {
        let weather: Weather = serde_json::from_str(r#"{"tempF": 40, "summary": "rain"}"#).unwrap();
        assert_eq!(weather.temp_f, Some(40.0));
        assert!(weather.is_cold());

        let empty: Weather = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.band(), None);
    }
}
