// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GrünFinder: explore the green spaces of a city
//!
//! This crate provides the green space catalog, the filtering and
//! nearest-neighbor query engine, and a JSON API on top of them.

pub mod config;
pub mod error;
pub mod geo_math;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{AddressResolver, Explorer, WeatherProvider};
use tokio::sync::RwLock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub explorer: RwLock<Explorer>,
    pub resolver: Box<dyn AddressResolver>,
    pub weather: Box<dyn WeatherProvider>,
}
