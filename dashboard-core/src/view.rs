//! Display-ready projection of the fetched data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    chart::ChartSeries,
    error::capitalize,
    model::{ForecastEntry, WeatherSnapshot},
    units::{self, TemperatureUnit},
};

/// Host serving the condition icons.
pub const ICON_HOST: &str = "https://openweathermap.org/img/wn";

/// `None` when the service sent no icon code.
pub fn icon_url(icon: &str) -> Option<String> {
    let icon = icon.trim();
    (!icon.is_empty()).then(|| format!("{ICON_HOST}/{icon}@2x.png"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub location: String,
    pub temperature: String,
    pub humidity: String,
    pub pressure: String,
    pub wind_speed: String,
    pub visibility: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl MetricsSummary {
    pub fn new(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Self {
        Self {
            location: snapshot.location_name.clone(),
            temperature: units::format_temperature(unit, snapshot.temperature_k),
            humidity: format!("{}%", snapshot.humidity_pct),
            pressure: format!("{} hPa", snapshot.pressure_hpa),
            wind_speed: format!("{:.1} m/s", snapshot.wind_speed_mps),
            visibility: snapshot
                .visibility_m
                .map(|v| format!("{v} m"))
                .unwrap_or_else(|| "n/a".to_string()),
            description: capitalize(&snapshot.description),
            icon_url: icon_url(&snapshot.icon),
            last_updated: snapshot.fetched_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub day_label: String,
    pub temperature: String,
    pub description: String,
    pub icon_url: Option<String>,
}

impl ForecastCard {
    pub fn new(entry: &ForecastEntry, unit: TemperatureUnit) -> Self {
        Self {
            day_label: entry.day_label.clone(),
            temperature: units::format_temperature(unit, entry.temperature_k),
            description: capitalize(&entry.description),
            icon_url: icon_url(&entry.icon),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub unit: TemperatureUnit,
    pub metrics: MetricsSummary,
    pub chart: ChartSeries,
    /// `None` when the forecast could not be fetched.
    pub forecast: Option<Vec<ForecastCard>>,
}

impl DashboardView {
    pub fn assemble(
        snapshot: &WeatherSnapshot,
        forecast: Option<&[ForecastEntry]>,
        unit: TemperatureUnit,
    ) -> Self {
        let chart = ChartSeries::from_snapshot(snapshot, unit);
        Self {
            title: chart.title.clone(),
            unit,
            metrics: MetricsSummary::new(snapshot, unit),
            chart,
            forecast: forecast
                .map(|entries| entries.iter().map(|e| ForecastCard::new(e, unit)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CurrentConditions;

    fn paris() -> WeatherSnapshot {
        WeatherSnapshot::new(
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
        )
    }

    #[test]
    fn paris_example_formats_like_the_dashboard() {
        let view = DashboardView::assemble(&paris(), None, TemperatureUnit::Celsius);

        assert_eq!(view.title, "Weather Data for Paris");
        assert_eq!(view.metrics.temperature, "22.0°C");
        assert_eq!(view.metrics.humidity, "60%");
        assert_eq!(view.metrics.pressure, "1012 hPa");
        assert_eq!(view.metrics.wind_speed, "3.5 m/s");
        assert_eq!(view.metrics.visibility, "10000 m");
        assert_eq!(view.metrics.description, "Clear sky");
        assert_eq!(
            view.metrics.icon_url.as_deref(),
            Some("https://openweathermap.org/img/wn/01d@2x.png")
        );
        assert!(view.forecast.is_none());
    }

    #[test]
    fn temperature_matches_rounded_celsius() {
        for kelvin in [250.0, 273.15, 273.40, 288.71, 295.40, 295.90, 301.449, 310.05] {
            let mut snap = paris();
            snap.temperature_k = kelvin;
            let view = DashboardView::assemble(&snap, None, TemperatureUnit::Celsius);
            let expected = format!("{:.1}°C", ((kelvin - 273.15) * 10.0).round() / 10.0);
            assert_eq!(view.metrics.temperature, expected, "kelvin {kelvin}");
        }
    }

    #[test]
    fn unit_switch_changes_only_temperature_fields() {
        let snap = paris();
        let c = DashboardView::assemble(&snap, None, TemperatureUnit::Celsius);
        let f = DashboardView::assemble(&snap, None, TemperatureUnit::Fahrenheit);

        assert_eq!(f.metrics.temperature, "71.6°F");
        assert_eq!(c.metrics.humidity, f.metrics.humidity);
        assert_eq!(c.metrics.pressure, f.metrics.pressure);
        assert_eq!(c.metrics.wind_speed, f.metrics.wind_speed);
        assert_eq!(c.metrics.visibility, f.metrics.visibility);
        assert_eq!(c.metrics.description, f.metrics.description);
    }

    #[test]
    fn forecast_cards_are_formatted() {
        let entries = vec![ForecastEntry {
            timestamp: Utc::now(),
            day_label: "Tue 14 Nov".into(),
            temperature_k: 280.0,
            icon: "10d".into(),
            description: "light rain".into(),
        }];

        let view = DashboardView::assemble(&paris(), Some(entries.as_slice()), TemperatureUnit::Celsius);
        let cards = view.forecast.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].temperature, "6.9°C");
        assert_eq!(cards[0].description, "Light rain");
        assert_eq!(
            cards[0].icon_url.as_deref(),
            Some("https://openweathermap.org/img/wn/10d@2x.png")
        );
    }

    #[test]
    fn half_tenth_readings_round_up_in_the_summary() {
        let mut snap = paris();
        snap.temperature_k = 295.40;
        let view = DashboardView::assemble(&snap, None, TemperatureUnit::Celsius);
        assert_eq!(view.metrics.temperature, "22.3°C");
    }

    #[test]
    fn missing_icon_yields_no_url() {
        assert_eq!(icon_url(""), None);
        assert_eq!(icon_url("  "), None);

        let mut snap = paris();
        snap.icon = String::new();
        let view = DashboardView::assemble(&snap, None, TemperatureUnit::Celsius);
        assert!(view.metrics.icon_url.is_none());
    }

    #[test]
    fn missing_visibility_is_shown_as_na() {
        let mut snap = paris();
        snap.visibility_m = None;
        let view = DashboardView::assemble(&snap, None, TemperatureUnit::Celsius);
        assert_eq!(view.metrics.visibility, "n/a");
    }
}
