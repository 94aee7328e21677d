use crate::{
    Config,
    error::FetchError,
    model::{CurrentConditions, ForecastFeed, Query},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and the multi-day forecast feed.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &Query) -> Result<CurrentConditions, FetchError>;

    async fn forecast(&self, city: &str) -> Result<ForecastFeed, FetchError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not rejected here: requests still go out and the
/// service answers with its own authorization error.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!(
                "No API key configured; requests will be rejected by OpenWeather. \
                 Hint: run `weather-dash configure` or set WEATHER_API_KEY."
            );
            String::new()
        }
    };

    Box::new(OpenWeatherProvider::with_base_url(api_key, config.api_base()))
}
