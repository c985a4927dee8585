// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use geo::Point;
use gruenfinder::config::Config;
use gruenfinder::models::{Category, Footprint, GreenSpace, LatLng};
use gruenfinder::routes::create_router;
use gruenfinder::services::{
    AddressResolver, BundledSource, Catalog, Explorer, OpenWeatherMapProvider,
};
use gruenfinder::AppState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Offline resolver with a fixed address book.
#[allow(dead_code)]
pub struct StaticResolver {
    places: HashMap<String, LatLng>,
}

#[allow(dead_code)]
impl StaticResolver {
    pub fn new(places: &[(&str, LatLng)]) -> Self {
        Self {
            places: places
                .iter()
                .map(|(name, loc)| (name.to_lowercase(), *loc))
                .collect(),
        }
    }

    /// Berlin landmarks used across tests.
    pub fn berlin() -> Self {
        Self::new(&[
            ("alexanderplatz", LatLng::new(52.5219, 13.4132)),
            ("tempelhof", LatLng::new(52.4730, 13.4030)),
            ("grunewald", LatLng::new(52.4800, 13.2000)),
        ])
    }
}

#[async_trait]
impl AddressResolver for StaticResolver {
    async fn resolve(&self, text: &str) -> Option<LatLng> {
        self.places.get(&text.trim().to_lowercase()).copied()
    }
}

/// A point-shaped green space for engine tests.
#[allow(dead_code)]
pub fn point_space(id: u64, lat: f64, lng: f64) -> GreenSpace {
    GreenSpace {
        id,
        name: format!("Green space {}", id),
        category: Category::Park,
        footprint: Footprint::Point(Point::new(lng, lat)),
        size_hectares: 5.0,
        facilities: Default::default(),
        accessibility: Default::default(),
        opening_hours: "Open 24 hours".to_string(),
        description: String::new(),
    }
}

/// Catalog with the bundled Berlin dataset.
#[allow(dead_code)]
pub fn berlin_catalog() -> Catalog {
    Catalog::new(BundledSource.green_spaces())
}

/// Create a test app with offline dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(berlin_catalog())
}

#[allow(dead_code)]
pub fn create_test_app_with(catalog: Catalog) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_resolver(catalog, Box::new(StaticResolver::berlin()))
}

#[allow(dead_code)]
pub fn create_test_app_with_resolver(
    catalog: Catalog,
    resolver: Box<dyn AddressResolver>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let weather = OpenWeatherMapProvider::new(
        config.weather_url.clone(),
        None,
        config.http_timeout,
    );

    let state = Arc::new(AppState {
        config,
        explorer: RwLock::new(Explorer::new(catalog)),
        resolver,
        weather: Box::new(weather),
    });

    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
