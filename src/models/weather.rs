// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather conditions shown in the green space detail view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Where a weather report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSource {
    Live,
    Default,
}

/// Current weather at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherReport {
    /// Degrees Celsius, rounded
    pub temperature: i32,
    pub condition: String,
    /// Font Awesome icon class
    pub icon: String,
    pub source: WeatherSource,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub observed_at: Option<DateTime<Utc>>,
}

impl Default for WeatherReport {
    /// Canned report used when no live data is available.
    fn default() -> Self {
        Self {
            temperature: 22,
            condition: "Sunny".to_string(),
            icon: "fa-sun".to_string(),
            source: WeatherSource::Default,
            observed_at: None,
        }
    }
}

/// Map a weather condition group to its display icon.
pub fn icon_for_condition(condition: &str) -> &'static str {
    match condition {
        "Clear" => "fa-sun",
        "Rain" => "fa-cloud-rain",
        "Snow" => "fa-snowflake",
        "Thunderstorm" => "fa-bolt",
        _ => "fa-cloud",
    }
}
