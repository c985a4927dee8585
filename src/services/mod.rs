// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod bundled;
pub mod catalog;
pub mod details;
pub mod explorer;
pub mod geocoding;
pub mod query;
pub mod source;
pub mod weather;

pub use bundled::BundledSource;
pub use catalog::Catalog;
pub use explorer::Explorer;
pub use geocoding::{AddressResolver, NominatimResolver, NoopResolver};
pub use source::{CatalogLoader, DataSource, FileSource, LoadTier, RemoteSource, SourceError};
pub use weather::{OpenWeatherMapProvider, WeatherProvider};
