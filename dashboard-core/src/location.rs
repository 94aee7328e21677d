//! Where the user is, and which city that is.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::LocationConfig,
    error::{FetchError, LocationError},
    model::{Coordinates, Query},
    provider::WeatherProvider,
};

/// Something that can report the device's position.
#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from explicit coordinates or the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    enabled: bool,
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(enabled: bool, coordinates: Option<Coordinates>) -> Self {
        Self { enabled, coordinates }
    }

    pub fn from_config(cfg: &LocationConfig) -> Self {
        let coordinates = match (cfg.latitude, cfg.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        };
        Self::new(cfg.enabled, coordinates)
    }

    /// Explicit coordinates win over whatever the config holds.
    pub fn with_override(mut self, coordinates: Option<Coordinates>) -> Self {
        if coordinates.is_some() {
            self.coordinates = coordinates;
        }
        self
    }
}

#[async_trait]
impl LocationSource for ConfiguredLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        if !self.enabled {
            return Err(LocationError::PermissionDenied);
        }
        self.coordinates.ok_or(LocationError::Unavailable)
    }
}

/// Map coordinates to a city name via the current-conditions endpoint, which
/// echoes the place it resolved.
pub async fn resolve_city(
    provider: &dyn WeatherProvider,
    coords: Coordinates,
) -> Result<String, FetchError> {
    tracing::debug!(%coords, "Resolving position to a city");

    let current = provider
        .current(&Query::Coordinates(coords))
        .await
        .map_err(|e| FetchError::Resolve(e.user_message()))?;

    let name = current.location_name.trim();
    if name.is_empty() {
        return Err(FetchError::Resolve(format!("no place name known for {coords}")));
    }

    tracing::info!("Resolved position to: {}", name);
    Ok(name.to_string())
}
