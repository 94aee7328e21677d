use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::units::TemperatureUnit;

pub const DEFAULT_API_BASE: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_CITY: &str = "London";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: &[&str] = &["WEATHER_API_KEY", "Weather_API_KEY"];
pub const API_BASE_VAR: &str = "WEATHER_API_BASE";

/// Where `here` may take coordinates from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// `false` behaves like a denied location permission.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self { enabled: true, latitude: None, longitude: None }
    }
}

fn enabled_by_default() -> bool {
    true
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Paris"
/// unit = "fahrenheit"
///
/// [location]
/// latitude = 48.85
/// longitude = 2.35
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the OpenWeather endpoint root.
    pub api_base: Option<String>,

    pub default_city: Option<String>,

    #[serde(default)]
    pub unit: TemperatureUnit,

    #[serde(default)]
    pub location: LocationConfig,
}

impl Config {
    /// API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().filter(|b| !b.trim().is_empty()).unwrap_or(DEFAULT_API_BASE)
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().filter(|c| !c.trim().is_empty()).unwrap_or(DEFAULT_CITY)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dash", "weather-dash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply environment overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| std::env::var(name).ok())
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.trim().is_empty())
        {
            self.api_key = Some(key);
        }

        if let Some(base) = lookup(API_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            self.api_base = Some(base);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.api_base(), DEFAULT_API_BASE);
        assert_eq!(cfg.default_city(), "London");
        assert_eq!(cfg.unit, TemperatureUnit::Celsius);
        assert!(cfg.location.enabled);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config { api_key: Some("   ".into()), ..Config::default() };
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn env_overrides_file_values() {
        let cfg = Config { api_key: Some("FILE".into()), ..Config::default() }
            .with_env_from(env(&[("WEATHER_API_KEY", "ENV"), ("WEATHER_API_BASE", "http://x")]));

        assert_eq!(cfg.api_key(), Some("ENV"));
        assert_eq!(cfg.api_base(), "http://x");
    }

    #[test]
    fn legacy_env_name_is_accepted() {
        let cfg = Config::default().with_env_from(env(&[("Weather_API_KEY", "LEGACY")]));
        assert_eq!(cfg.api_key(), Some("LEGACY"));
    }

    #[test]
    fn empty_env_does_not_clobber_file_key() {
        let cfg = Config { api_key: Some("FILE".into()), ..Config::default() }
            .with_env_from(env(&[("WEATHER_API_KEY", "")]));
        assert_eq!(cfg.api_key(), Some("FILE"));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            api_base: None,
            default_city: Some("Paris".into()),
            unit: TemperatureUnit::Fahrenheit,
            location: LocationConfig { enabled: true, latitude: Some(48.85), longitude: Some(2.35) },
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key(), Some("KEY"));
        assert_eq!(loaded.default_city(), "Paris");
        assert_eq!(loaded.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(loaded.location, cfg.location);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("unit = \"fahrenheit\"\n[location]\nenabled = false\n").unwrap();
        assert_eq!(cfg.unit, TemperatureUnit::Fahrenheit);
        assert!(!cfg.location.enabled);
        assert_eq!(cfg.default_city(), "London");
    }

    #[test]
    fn broken_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "unit = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
