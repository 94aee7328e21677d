use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_API_BASE,
    error::{FetchError, truncate_body},
    model::{CurrentConditions, ForecastFeed, ForecastSample, Query},
};

use super::WeatherProvider;

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, ?params, "OpenWeather request");

        let mut query = params;
        query.push(("appid", self.api_key.clone()));

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| FetchError::Transport { endpoint, source })?;

        if !status.is_success() {
            let message = serde_json::from_str::<OwErrorBody>(&body).ok().and_then(|e| e.message);
            tracing::debug!(status = status.as_u16(), ?message, "OpenWeather {endpoint} request rejected");
            return Err(FetchError::Api {
                endpoint,
                status: status.as_u16(),
                message,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    #[serde(default)]
    name: String,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    city: OwCity,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

fn condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> Result<CurrentConditions, FetchError> {
        let params = match query {
            Query::City(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(FetchError::EmptyCity);
                }
                vec![("q", name.to_string())]
            }
            Query::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        };

        let parsed: OwCurrentResponse = self.get_json(CURRENT_ENDPOINT, params).await?;
        let (description, icon) = condition(&parsed.weather);

        Ok(CurrentConditions {
            location_name: parsed.name,
            temperature_k: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
            description,
            icon,
        })
    }

    async fn forecast(&self, city: &str) -> Result<ForecastFeed, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let parsed: OwForecastResponse =
            self.get_json(FORECAST_ENDPOINT, vec![("q", city.to_string())]).await?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let (description, icon) = condition(&entry.weather);
                ForecastSample { dt: entry.dt, temperature_k: entry.main.temp, icon, description }
            })
            .collect();

        Ok(ForecastFeed {
            city_name: parsed.city.name,
            utc_offset_secs: parsed.city.timezone,
            samples,
        })
    }
}
