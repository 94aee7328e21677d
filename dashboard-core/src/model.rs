use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::units::{self, TemperatureUnit};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What the current-conditions endpoint is asked about.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    pub fn city(name: impl Into<String>) -> Self {
        Query::City(name.into())
    }

    /// A city query with nothing but whitespace is rejected before any request.
    pub fn is_blank(&self) -> bool {
        matches!(self, Query::City(name) if name.trim().is_empty())
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates(coords) => write!(f, "({coords})"),
        }
    }
}

/// Fields extracted from one current-conditions response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_k: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub visibility_m: Option<u32>,
    pub description: String,
    pub icon: String,
}

/// The most recent reading. Temperature stays in Kelvin; display units are
/// derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub temperature_k: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub visibility_m: Option<u32>,
    pub description: String,
    pub icon: String,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn new(conditions: CurrentConditions, fetched_at: DateTime<Utc>) -> Self {
        Self {
            location_name: conditions.location_name,
            temperature_k: conditions.temperature_k,
            humidity_pct: conditions.humidity_pct,
            pressure_hpa: conditions.pressure_hpa,
            wind_speed_mps: conditions.wind_speed_mps,
            visibility_m: conditions.visibility_m,
            description: conditions.description,
            icon: conditions.icon,
            fetched_at,
        }
    }

    pub fn temperature(&self, unit: TemperatureUnit) -> f64 {
        units::kelvin_to(unit, self.temperature_k)
    }
}

/// One 3-hour entry of the forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub dt: i64,
    pub temperature_k: f64,
    pub icon: String,
    pub description: String,
}

/// Forecast feed as returned by the provider, before daily sampling.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastFeed {
    pub city_name: String,
    /// Shift from UTC in seconds for the forecast's city.
    pub utc_offset_secs: i32,
    pub samples: Vec<ForecastSample>,
}

/// One daily sample shown in the forecast section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    pub day_label: String,
    pub temperature_k: f64,
    pub icon: String,
    pub description: String,
}

impl ForecastEntry {
    pub fn temperature(&self, unit: TemperatureUnit) -> f64 {
        units::kelvin_to(unit, self.temperature_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_city_queries_are_detected() {
        assert!(Query::city("").is_blank());
        assert!(Query::city("   \t").is_blank());
        assert!(!Query::city("Paris").is_blank());

        let coords = Query::Coordinates(Coordinates { latitude: 0.0, longitude: 0.0 });
        assert!(!coords.is_blank());
    }

    #[test]
    fn snapshot_derives_units_from_kelvin() {
        let snapshot = WeatherSnapshot::new(
            CurrentConditions {
                location_name: "Paris".into(),
                temperature_k: 295.15,
                humidity_pct: 60,
                pressure_hpa: 1012,
                wind_speed_mps: 3.5,
                visibility_m: Some(10_000),
                description: "clear sky".into(),
                icon: "01d".into(),
            },
            Utc::now(),
        );

        assert!((snapshot.temperature(TemperatureUnit::Celsius) - 22.0).abs() < 1e-9);
        assert!((snapshot.temperature(TemperatureUnit::Fahrenheit) - 71.6).abs() < 1e-9);
        assert!((snapshot.temperature_k - 295.15).abs() < f64::EPSILON);
    }
}
