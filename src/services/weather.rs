// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current weather for the detail view (OpenWeatherMap).

use crate::models::green_space::LatLng;
use crate::models::weather::{icon_for_condition, WeatherReport, WeatherSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Provides current weather. Never fails: unavailable data yields the
/// default report.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn get(&self, location: LatLng) -> WeatherReport;
}

/// OpenWeatherMap current-weather client.
#[derive(Clone)]
pub struct OpenWeatherMapProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    weather: Vec<OwmCondition>,
    main: OwmMain,
    /// Observation time (unix seconds)
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
}

impl OpenWeatherMapProvider {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client for weather");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    async fn fetch(&self, api_key: &str, location: LatLng) -> anyhow::Result<WeatherReport> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lng.to_string()),
                ("units", "metric".to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: OwmResponse = response.json().await?;
        into_report(body)
    }
}

fn into_report(body: OwmResponse) -> anyhow::Result<WeatherReport> {
    let condition = body
        .weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| anyhow::anyhow!("weather response has no conditions"))?;

    Ok(WeatherReport {
        temperature: body.main.temp.round() as i32,
        icon: icon_for_condition(&condition).to_string(),
        condition,
        source: WeatherSource::Live,
        observed_at: body.dt.and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)),
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    async fn get(&self, location: LatLng) -> WeatherReport {
        let Some(api_key) = self.api_key.as_deref() else {
            return WeatherReport::default();
        };

        match self.fetch(api_key, location).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(
                    lat = location.lat,
                    lng = location.lng,
                    error = %e,
                    "Weather lookup failed, using default"
                );
                WeatherReport::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_api_key_returns_default() {
        let provider = OpenWeatherMapProvider::new(
            "https://api.openweathermap.org/data/2.5/weather",
            Some("  ".to_string()),
            Duration::from_secs(1),
        );
        let report = provider.get(LatLng::new(52.52, 13.40)).await;
        assert_eq!(report, WeatherReport::default());
        assert_eq!(report.source, WeatherSource::Default);
    }

    #[test]
    fn test_report_from_response() {
        let body: OwmResponse = serde_json::from_str(
            r#"{"weather": [{"main": "Rain", "description": "light rain"}], "main": {"temp": 11.6}, "dt": 1760000000}"#,
        )
        .unwrap();
        let report = into_report(body).unwrap();
        assert_eq!(report.temperature, 12);
        assert_eq!(report.condition, "Rain");
        assert_eq!(report.icon, "fa-cloud-rain");
        assert_eq!(report.source, WeatherSource::Live);
        assert!(report.observed_at.is_some());
    }

    #[test]
    fn test_response_without_conditions_is_error() {
        let body: OwmResponse =
            serde_json::from_str(r#"{"weather": [], "main": {"temp": 3.0}}"#).unwrap();
        assert!(into_report(body).is_err());
    }

    #[test]
    fn test_unknown_condition_icon() {
        assert_eq!(icon_for_condition("Mist"), "fa-cloud");
        assert_eq!(icon_for_condition("Clear"), "fa-sun");
    }
}
