//! Multi-metric chart dataset derived from a snapshot.
//!
//! Each metric keeps its raw value and unit for its own axis, plus a value
//! normalized into `[0, 1]` against a fixed reference range so metrics of very
//! different magnitude can be drawn side by side.

use serde::Serialize;

use crate::{
    model::WeatherSnapshot,
    units::{self, TemperatureUnit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    Visibility,
}

impl Metric {
    pub const fn all() -> &'static [Metric] {
        &[
            Metric::Temperature,
            Metric::Humidity,
            Metric::Pressure,
            Metric::WindSpeed,
            Metric::Visibility,
        ]
    }

    pub fn axis_id(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Pressure => "pressure",
            Metric::WindSpeed => "wind",
            Metric::Visibility => "visibility",
        }
    }

    /// Line and fill colors.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            Metric::Temperature => ("rgba(255,99,132,1)", "rgba(255,99,132,0.2)"),
            Metric::Humidity => ("rgba(54,162,235,1)", "rgba(54,162,235,0.2)"),
            Metric::Pressure => ("rgba(75,192,192,1)", "rgba(75,192,192,0.2)"),
            Metric::WindSpeed => ("rgba(153,102,255,1)", "rgba(153,102,255,0.2)"),
            Metric::Visibility => ("rgba(255,159,64,1)", "rgba(255,159,64,0.2)"),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Pressure => "Pressure",
            Metric::WindSpeed => "Wind Speed",
            Metric::Visibility => "Visibility",
        }
    }

    fn unit_suffix(&self, unit: TemperatureUnit) -> &'static str {
        match self {
            Metric::Temperature => unit.symbol(),
            Metric::Humidity => "%",
            Metric::Pressure => "hPa",
            Metric::WindSpeed => "m/s",
            Metric::Visibility => "m",
        }
    }

    /// Reference range used for normalization, in the metric's display unit.
    fn reference_range(&self, unit: TemperatureUnit) -> (f64, f64) {
        match self {
            Metric::Temperature => (
                units::kelvin_to(unit, units::KELVIN_OFFSET - 30.0),
                units::kelvin_to(unit, units::KELVIN_OFFSET + 50.0),
            ),
            Metric::Humidity => (0.0, 100.0),
            Metric::Pressure => (950.0, 1050.0),
            Metric::WindSpeed => (0.0, 30.0),
            Metric::Visibility => (0.0, 10_000.0),
        }
    }

    /// Label shown in the legend, e.g. `Temperature (°C)`.
    pub fn label(&self, unit: TemperatureUnit) -> String {
        format!("{} ({})", self.name(), self.unit_suffix(unit))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub metric: Metric,
    pub label: String,
    pub value: f64,
    pub unit: &'static str,
    pub axis_id: &'static str,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_snapshot(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Self {
        let points = Metric::all()
            .iter()
            .map(|&metric| {
                let value = metric_value(snapshot, metric, unit);
                let (border_color, background_color) = metric.colors();
                ChartPoint {
                    metric,
                    label: metric.label(unit),
                    value,
                    unit: metric.unit_suffix(unit),
                    axis_id: metric.axis_id(),
                    border_color,
                    background_color,
                    normalized: normalize(value, metric.reference_range(unit)),
                }
            })
            .collect();

        Self { title: format!("Weather Data for {}", snapshot.location_name), points }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn point(&self, metric: Metric) -> Option<&ChartPoint> {
        self.points.iter().find(|p| p.metric == metric)
    }
}

fn metric_value(snapshot: &WeatherSnapshot, metric: Metric, unit: TemperatureUnit) -> f64 {
    match metric {
        Metric::Temperature => snapshot.temperature(unit),
        Metric::Humidity => f64::from(snapshot.humidity_pct),
        Metric::Pressure => f64::from(snapshot.pressure_hpa),
        Metric::WindSpeed => snapshot.wind_speed_mps,
        Metric::Visibility => snapshot.visibility_m.map(f64::from).unwrap_or(0.0),
    }
}

fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
