//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind a provider trait
//! - Unit conversion, forecast sampling, chart data and view assembly
//! - The dashboard state machine that ties a user action to its requests
//!
//! It renders nothing itself; `dashboard-cli` is one front-end over it.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod provider;
pub mod units;
pub mod view;

pub use config::{Config, LocationConfig};
pub use dashboard::{Dashboard, DashboardState, RequestTicket};
pub use error::{FetchError, LocationError};
pub use location::{ConfiguredLocation, LocationSource};
pub use model::{Coordinates, CurrentConditions, ForecastEntry, Query, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
pub use units::TemperatureUnit;
pub use view::DashboardView;
