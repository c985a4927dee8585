// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Address resolution for free-text search.
//!
//! Resolution is best effort: any failure is logged and reported as
//! "not found" so that filtering can continue without a search anchor.

use crate::models::green_space::LatLng;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Turns free text into a coordinate.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve `text`, or `None` if it can't be located.
    async fn resolve(&self, text: &str) -> Option<LatLng>;
}

/// Resolver that never finds anything. Used when geocoding is disabled.
pub struct NoopResolver;

#[async_trait]
impl AddressResolver for NoopResolver {
    async fn resolve(&self, _text: &str) -> Option<LatLng> {
        None
    }
}

/// Geocoding errors, never surfaced past the resolver.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Geocoder returned HTTP {0}")]
    Status(u16),

    #[error("Invalid coordinate in geocoder response: {0}")]
    InvalidCoordinate(String),
}

/// Nominatim (OpenStreetMap) search API client.
#[derive(Clone)]
pub struct NominatimResolver {
    http: reqwest::Client,
    base_url: String,
    /// Appended to queries to keep results in the configured city
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimResolver {
    pub fn new(
        base_url: impl Into<String>,
        city: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        // Nominatim's usage policy requires an identifying User-Agent
        let http = reqwest::Client::builder()
            .user_agent(concat!("gruenfinder/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            city,
        })
    }

    fn query_for(&self, text: &str) -> String {
        match &self.city {
            Some(city) if !text.to_lowercase().contains(&city.to_lowercase()) => {
                format!("{}, {}", text.trim(), city)
            }
            _ => text.trim().to_string(),
        }
    }

    async fn search(&self, text: &str) -> Result<Option<LatLng>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let query = self.query_for(text);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query.as_str())])
            .send()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        places.first().map(parse_place).transpose()
    }
}

fn parse_place(place: &NominatimPlace) -> Result<LatLng, GeocodeError> {
    let lat = place
        .lat
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidCoordinate(place.lat.clone()))?;
    let lng = place
        .lon
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidCoordinate(place.lon.clone()))?;
    Ok(LatLng::new(lat, lng))
}

#[async_trait]
impl AddressResolver for NominatimResolver {
    async fn resolve(&self, text: &str) -> Option<LatLng> {
        match self.search(text).await {
            Ok(Some(location)) => {
                tracing::debug!(query = %text, lat = location.lat, lng = location.lng, "Address resolved");
                Some(location)
            }
            Ok(None) => {
                tracing::info!(query = %text, "Address not found");
                None
            }
            Err(e) => {
                tracing::warn!(query = %text, error = %e, "Geocoding failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(city: Option<&str>) -> NominatimResolver {
        NominatimResolver::new(
            "https://nominatim.example.org/",
            city.map(str::to_string),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_query_appends_city() {
        let r = resolver(Some("Berlin"));
        assert_eq!(r.query_for(" Alexanderplatz "), "Alexanderplatz, Berlin");
        assert_eq!(r.query_for("Unter den Linden, berlin"), "Unter den Linden, berlin");
        assert_eq!(r.base_url, "https://nominatim.example.org");
    }

    #[test]
    fn test_query_without_city() {
        assert_eq!(resolver(None).query_for("Hauptstraße 1"), "Hauptstraße 1");
    }

    #[test]
    fn test_parse_place() {
        let place: NominatimPlace =
            serde_json::from_str(r#"{"lat": "52.5219", "lon": "13.4132", "display_name": "x"}"#)
                .unwrap();
        assert_eq!(parse_place(&place).unwrap(), LatLng::new(52.5219, 13.4132));

        let bad = NominatimPlace {
            lat: "north".to_string(),
            lon: "13.4".to_string(),
        };
        assert!(parse_place(&bad).is_err());
    }

    #[tokio::test]
    async fn test_noop_resolver() {
        assert_eq!(NoopResolver.resolve("Alexanderplatz").await, None);
    }
}
