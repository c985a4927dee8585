// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Green space data sources and the tiered catalog loader.
//!
//! A load tries the primary source, then the fallback source, then the
//! bundled sample dataset. Every tier yields a complete collection or an
//! error; collections are never merged across tiers.

use crate::config::Config;
use crate::models::green_space::{Category, Footprint, GreenSpace};
use crate::services::bundled::BundledSource;
use async_trait::async_trait;
use geo::{MultiPolygon, Point, Polygon};
use geojson::{feature::Id, Feature, GeoJson};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A provider of the full green space collection.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short description for logs (path, URL, ...).
    fn describe(&self) -> String;

    /// Fetch the complete collection, or fail without returning a partial one.
    async fn acquire_all(&self) -> Result<Vec<GreenSpace>, SourceError>;
}

/// Errors from acquiring green space data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to fetch remote data: {0}")]
    HttpError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Expected a GeoJSON FeatureCollection")]
    NotAFeatureCollection,

    #[error("Feature {0} has no numeric id")]
    MissingId(usize),

    #[error("Duplicate green space id: {0}")]
    DuplicateId(u64),

    #[error("Green space {0} has no geometry")]
    MissingGeometry(u64),

    #[error("Green space {0} has an empty geometry")]
    EmptyGeometry(u64),

    #[error("Unsupported geometry type for green space {0} (expected Point, Polygon or MultiPolygon)")]
    UnsupportedGeometry(u64),

    #[error("Green space {0} has an invalid size")]
    InvalidSize(u64),

    #[error("Source returned no green spaces")]
    Empty,
}

/// Parse a GeoJSON FeatureCollection of green spaces.
///
/// Properties read per feature: `name`, `type`, `size_ha`, `facilities`,
/// `accessibility`, `opening_hours`, `description`. The id comes from the
/// feature id or an `id` property.
pub fn parse_feature_collection(json_data: &str) -> Result<Vec<GreenSpace>, SourceError> {
    let geojson: GeoJson = json_data
        .parse()
        .map_err(|e: geojson::Error| SourceError::ParseError(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(SourceError::NotAFeatureCollection);
    };

    let mut green_spaces = Vec::with_capacity(collection.features.len());
    let mut seen = HashSet::new();

    for (index, feature) in collection.features.into_iter().enumerate() {
        let green_space = convert_feature(index, feature)?;
        if !seen.insert(green_space.id) {
            return Err(SourceError::DuplicateId(green_space.id));
        }
        green_spaces.push(green_space);
    }

    Ok(green_spaces)
}

fn convert_feature(index: usize, feature: Feature) -> Result<GreenSpace, SourceError> {
    let id = feature_id(&feature).ok_or(SourceError::MissingId(index))?;

    let text = |key: &str| {
        feature
            .property(key)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    };
    let tags = |key: &str| -> BTreeSet<String> {
        feature
            .property(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|t| t.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    let name = feature
        .property("name")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown")
        .to_string();
    let category = Category::parse(&text("type"));

    let size_hectares = match feature.property("size_ha") {
        None | Some(serde_json::Value::Null) => 0.0,
        Some(v) => v.as_f64().ok_or(SourceError::InvalidSize(id))?,
    };
    if !size_hectares.is_finite() || size_hectares < 0.0 {
        return Err(SourceError::InvalidSize(id));
    }

    let facilities = tags("facilities");
    let accessibility = tags("accessibility");
    let opening_hours = text("opening_hours");
    let description = text("description");

    let geometry = feature
        .geometry
        .ok_or(SourceError::MissingGeometry(id))?;
    let footprint = convert_geometry(id, geometry.value)?;
    if !footprint.has_anchor() {
        return Err(SourceError::EmptyGeometry(id));
    }

    Ok(GreenSpace {
        id,
        name,
        category,
        footprint,
        size_hectares,
        facilities,
        accessibility,
        opening_hours,
        description,
    })
}

fn feature_id(feature: &Feature) -> Option<u64> {
    match &feature.id {
        Some(Id::Number(n)) => n.as_u64(),
        Some(Id::String(s)) => s.parse().ok(),
        None => match feature.property("id")? {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        },
    }
}

/// Convert GeoJSON geometry to our internal format.
fn convert_geometry(id: u64, value: geojson::Value) -> Result<Footprint, SourceError> {
    use std::convert::TryInto;

    let point_result: Result<Point<f64>, _> = value.clone().try_into();
    if let Ok(point) = point_result {
        return Ok(Footprint::Point(point));
    }

    let poly_result: Result<Polygon<f64>, _> = value.clone().try_into();
    if let Ok(poly) = poly_result {
        return Ok(Footprint::Polygon(poly));
    }

    let multi_result: Result<MultiPolygon<f64>, _> = value.try_into();
    if let Ok(multi) = multi_result {
        return Ok(Footprint::MultiPolygon(multi));
    }

    Err(SourceError::UnsupportedGeometry(id))
}

/// GeoJSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn acquire_all(&self) -> Result<Vec<GreenSpace>, SourceError> {
        let json_data = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::IoError(e.to_string()))?;
        parse_feature_collection(&json_data)
    }
}

/// GeoJSON served over HTTP.
pub struct RemoteSource {
    http: reqwest::Client,
    url: String,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::HttpError(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DataSource for RemoteSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn acquire_all(&self) -> Result<Vec<GreenSpace>, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::HttpError(format!("HTTP {}", response.status())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::HttpError(e.to_string()))?;
        parse_feature_collection(&body)
    }
}

/// Which tier of the loader produced the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTier {
    Primary,
    Fallback,
    Default,
}

/// A complete collection plus the tier it came from.
#[derive(Debug, Clone)]
pub struct LoadedCollection {
    pub tier: LoadTier,
    pub source: String,
    pub green_spaces: Vec<GreenSpace>,
}

/// Loads the green space collection, degrading through the configured tiers.
#[derive(Default)]
pub struct CatalogLoader {
    primary: Option<Box<dyn DataSource>>,
    fallback: Option<Box<dyn DataSource>>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, source: impl DataSource + 'static) -> Self {
        self.primary = Some(Box::new(source));
        self
    }

    pub fn with_fallback(mut self, source: impl DataSource + 'static) -> Self {
        self.fallback = Some(Box::new(source));
        self
    }

    /// Remote URL as primary, file as fallback. Either may be absent.
    pub fn from_config(config: &Config) -> Self {
        let mut loader = Self::new();

        let file = config.green_spaces_path.as_ref().map(FileSource::new);
        let remote = config.green_spaces_url.as_ref().and_then(|url| {
            RemoteSource::new(url.clone(), config.http_timeout)
                .map_err(|e| tracing::warn!(error = %e, "Remote data source unavailable"))
                .ok()
        });

        match (remote, file) {
            (Some(remote), Some(file)) => {
                loader = loader.with_primary(remote).with_fallback(file);
            }
            (Some(remote), None) => loader = loader.with_primary(remote),
            (None, Some(file)) => loader = loader.with_primary(file),
            (None, None) => {}
        }

        loader
    }

    /// Acquire one complete collection. Never fails: the last tier is the
    /// bundled dataset.
    pub async fn load(&self) -> LoadedCollection {
        let tiers = [
            (LoadTier::Primary, self.primary.as_deref()),
            (LoadTier::Fallback, self.fallback.as_deref()),
        ];

        for (tier, source) in tiers {
            let Some(source) = source else {
                continue;
            };
            let description = source.describe();

            match acquire_non_empty(source).await {
                Ok(green_spaces) => {
                    tracing::info!(
                        tier = ?tier,
                        source = %description,
                        count = green_spaces.len(),
                        "Loaded green spaces"
                    );
                    return LoadedCollection {
                        tier,
                        source: description,
                        green_spaces,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        tier = ?tier,
                        source = %description,
                        error = %e,
                        "Green space source failed, trying next tier"
                    );
                }
            }
        }

        let bundled = BundledSource;
        let green_spaces = bundled.green_spaces();
        tracing::info!(
            tier = ?LoadTier::Default,
            count = green_spaces.len(),
            "Using bundled green space dataset"
        );
        LoadedCollection {
            tier: LoadTier::Default,
            source: bundled.describe(),
            green_spaces,
        }
    }
}

async fn acquire_non_empty(source: &dyn DataSource) -> Result<Vec<GreenSpace>, SourceError> {
    let green_spaces = source.acquire_all().await?;
    if green_spaces.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(green_spaces)
}
