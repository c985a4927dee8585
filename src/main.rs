// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GrünFinder API Server
//!
//! Serves the green space catalog with filtering, nearest green space
//! lookup and detail views.

use gruenfinder::{
    config::Config,
    services::{
        AddressResolver, CatalogLoader, Explorer, NominatimResolver, NoopResolver,
        OpenWeatherMapProvider,
    },
    AppState,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting GrünFinder API");

    // Load green spaces (never fails, degrades to the bundled dataset)
    let loader = CatalogLoader::from_config(&config);
    let explorer = Explorer::load(&loader).await;
    tracing::info!(
        count = explorer.catalog().len(),
        tier = ?explorer.catalog().load_tier(),
        source = explorer.catalog().source().unwrap_or("none"),
        "Green space catalog loaded"
    );

    let resolver: Box<dyn AddressResolver> = if config.geocoding_enabled() {
        Box::new(NominatimResolver::new(
            config.geocoder_url.clone(),
            config.geocoder_city.clone(),
            config.http_timeout,
        )?)
    } else {
        tracing::info!("Geocoding disabled");
        Box::new(NoopResolver)
    };

    let weather = OpenWeatherMapProvider::new(
        config.weather_url.clone(),
        config.weather_api_key.clone(),
        config.http_timeout,
    );
    if config.weather_api_key.is_none() {
        tracing::info!("No OpenWeatherMap API key, serving default weather");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        explorer: RwLock::new(explorer),
        resolver,
        weather: Box::new(weather),
    });

    // Build router
    let app = gruenfinder::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gruenfinder=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
