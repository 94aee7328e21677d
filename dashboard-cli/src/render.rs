use std::fmt::{self, Write};

use dashboard_core::view::DashboardView;

const BAR_WIDTH: usize = 30;

/// Text rendering of a dashboard view.
pub fn dashboard(view: &DashboardView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let m = &view.metrics;

    writeln!(out, "{}", view.title)?;
    writeln!(out, "{}", "=".repeat(view.title.chars().count()))?;
    match &m.icon_url {
        Some(url) => writeln!(out, "  {}  ({url})", m.description)?,
        None => writeln!(out, "  {}", m.description)?,
    }
    writeln!(out)?;

    let rows = [
        ("Temperature", &m.temperature),
        ("Humidity", &m.humidity),
        ("Pressure", &m.pressure),
        ("Wind Speed", &m.wind_speed),
        ("Visibility", &m.visibility),
    ];
    for (label, value) in rows {
        writeln!(out, "  {label:<12} {value}")?;
    }
    writeln!(out, "  Updated      {}", m.last_updated.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out)?;

    let label_width =
        view.chart.points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    for point in &view.chart.points {
        writeln!(
            out,
            "  {:<label_width$}  {}  {:.1} {}",
            point.label,
            bar(point.normalized),
            point.value,
            point.unit,
        )?;
    }

    if let Some(cards) = &view.forecast {
        writeln!(out)?;
        writeln!(out, "Forecast")?;
        for card in cards {
            writeln!(
                out,
                "  {:<11} {:>8}  {}",
                card.day_label, card.temperature, card.description
            )?;
        }
    }

    Ok(out)
}

fn bar(normalized: f64) -> String {
    let filled = (normalized.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dashboard_core::{CurrentConditions, ForecastEntry, TemperatureUnit, WeatherSnapshot};

    fn view(forecast: Option<&[ForecastEntry]>) -> DashboardView {
        view_with_icon(forecast, "01d")
    }

    fn view_with_icon(forecast: Option<&[ForecastEntry]>, icon: &str) -> DashboardView {
        let snapshot = WeatherSnapshot::new(
            CurrentConditions {
                location_name: "Paris".into(),
                temperature_k: 295.15,
                humidity_pct: 60,
                pressure_hpa: 1012,
                wind_speed_mps: 3.5,
                visibility_m: Some(10_000),
                description: "clear sky".into(),
                icon: icon.into(),
            },
            Utc::now(),
        );
        DashboardView::assemble(&snapshot, forecast, TemperatureUnit::Celsius)
    }

    #[test]
    fn renders_metrics_and_chart() {
        let out = dashboard(&view(None)).unwrap();

        assert!(out.starts_with("Weather Data for Paris\n"));
        assert!(out.contains("Clear sky  (https://openweathermap.org/img/wn/01d@2x.png)"));
        assert!(out.contains("Temperature  22.0°C"));
        assert!(out.contains("Humidity     60%"));
        assert!(out.contains("Clear sky"));
        assert!(out.contains("Visibility (m)"));
        assert!(!out.contains("Forecast"));
    }

    #[test]
    fn renders_forecast_when_present() {
        let entries = vec![ForecastEntry {
            timestamp: Utc::now(),
            day_label: "Tue 14 Nov".into(),
            temperature_k: 280.0,
            icon: "10d".into(),
            description: "light rain".into(),
        }];
        let out = dashboard(&view(Some(entries.as_slice()))).unwrap();

        assert!(out.contains("Forecast"));
        assert!(out.contains("Tue 14 Nov"));
        assert!(out.contains("6.9°C"));
        assert!(out.contains("Light rain"));
    }

    #[test]
    fn missing_icon_leaves_no_empty_url() {
        let out = dashboard(&view_with_icon(None, "")).unwrap();

        assert!(out.contains("  Clear sky\n"));
        assert!(!out.contains("@2x.png"));
        assert!(!out.contains("()"));
    }

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(bar(0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(bar(1.0), "#".repeat(BAR_WIDTH));
        assert_eq!(bar(2.0).len(), BAR_WIDTH);
        assert_eq!(bar(0.5).matches('#').count(), BAR_WIDTH / 2);
    }
}
