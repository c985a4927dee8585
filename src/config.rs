// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GeoJSON file with green spaces (fallback tier, or primary if no URL)
    pub green_spaces_path: Option<PathBuf>,
    /// Remote GeoJSON endpoint with green spaces (primary tier)
    pub green_spaces_url: Option<String>,
    /// Nominatim-compatible geocoder base URL; empty disables geocoding
    pub geocoder_url: String,
    /// City appended to search queries
    pub geocoder_city: Option<String>,
    /// OpenWeatherMap current-weather endpoint
    pub weather_url: String,
    /// OpenWeatherMap API key; without one the default report is used
    pub weather_api_key: Option<String>,
    /// Timeout for outgoing HTTP requests
    pub http_timeout: Duration,
}

impl Default for Config {
    /// Offline config for testing: bundled data, no geocoding, default weather.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            green_spaces_path: None,
            green_spaces_url: None,
            geocoder_url: String::new(),
            geocoder_city: Some("Berlin".to_string()),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            weather_api_key: None,
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match non_empty("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT", v))?,
            None => 8080,
        };
        let http_timeout = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", v))?,
            ),
            None => Duration::from_secs(10),
        };

        Ok(Self {
            port,
            frontend_url: non_empty("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            green_spaces_path: non_empty("GREEN_SPACES_PATH").map(PathBuf::from),
            green_spaces_url: non_empty("GREEN_SPACES_URL"),
            geocoder_url: env::var("GEOCODER_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string()),
            geocoder_city: match env::var("GEOCODER_CITY") {
                Ok(v) if v.trim().is_empty() => None,
                Ok(v) => Some(v.trim().to_string()),
                Err(_) => Some("Berlin".to_string()),
            },
            weather_url: non_empty("OPENWEATHERMAP_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            weather_api_key: non_empty("OPENWEATHERMAP_API_KEY"),
            http_timeout,
        })
    }

    pub fn geocoding_enabled(&self) -> bool {
        !self.geocoder_url.is_empty()
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        env::set_var("GREEN_SPACES_PATH", "data/green_spaces.geojson");
        env::set_var("OPENWEATHERMAP_API_KEY", "  ");
        env::set_var("GEOCODER_CITY", "");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(
            config.green_spaces_path,
            Some(PathBuf::from("data/green_spaces.geojson"))
        );
        assert_eq!(config.weather_api_key, None);
        assert_eq!(config.geocoder_city, None);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("PORT", _))
        ));

        env::remove_var("PORT");
        env::remove_var("GREEN_SPACES_PATH");
        env::remove_var("OPENWEATHERMAP_API_KEY");
        env::remove_var("GEOCODER_CITY");
    }

    #[test]
    fn test_default_is_offline() {
        let config = Config::default();
        assert!(!config.geocoding_enabled());
        assert!(config.weather_api_key.is_none());
        assert!(config.green_spaces_url.is_none());
    }
}
