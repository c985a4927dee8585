// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance and travel-time estimation.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Mean Earth radius used for all distance math (meters).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance in meters between two WGS84 coordinates.
///
/// Coordinates are not range-checked.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// How a visitor gets to a green space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Walking,
    Cycling,
    PublicTransport,
    Driving,
}

impl TravelMode {
    /// Average speed in meters per minute.
    pub fn meters_per_minute(self) -> f64 {
        match self {
            TravelMode::Walking => 80.0,
            TravelMode::Cycling => 250.0,
            TravelMode::PublicTransport => 333.0,
            TravelMode::Driving => 500.0,
        }
    }

    /// Parse a mode name. Unknown names fall back to walking.
    pub fn parse(mode: &str) -> Self {
        match mode.trim().to_ascii_lowercase().as_str() {
            "cycling" | "bicycling" | "bike" => TravelMode::Cycling,
            "public_transport" | "transit" => TravelMode::PublicTransport,
            "driving" | "car" => TravelMode::Driving,
            _ => TravelMode::Walking,
        }
    }

    /// Suffix used in mode-qualified labels ("12 minutes walking").
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
            TravelMode::PublicTransport => "by public transport",
            TravelMode::Driving => "driving",
        }
    }
}

/// Estimated travel duration, rounded to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TravelTime {
    pub hours: u32,
    pub minutes: u32,
}

impl TravelTime {
    /// Estimate the travel time for a distance at the mode's average speed.
    pub fn estimate(distance_meters: f64, mode: TravelMode) -> Self {
        let total = (distance_meters / mode.meters_per_minute()).round();
        // Negative or NaN distances collapse to zero
        let total = if total.is_finite() && total > 0.0 {
            total as u32
        } else {
            0
        };
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for TravelTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(n: u32, unit: &str) -> String {
            if n == 1 {
                format!("1 {}", unit)
            } else {
                format!("{} {}s", n, unit)
            }
        }

        match (self.hours, self.minutes) {
            (0, 0) => write!(f, "less than a minute"),
            (0, m) => write!(f, "{}", plural(m, "minute")),
            (h, 0) => write!(f, "{}", plural(h, "hour")),
            (h, m) => write!(f, "{} and {}", plural(h, "hour"), plural(m, "minute")),
        }
    }
}

/// Human-readable travel time including the mode, e.g. "1 hour and 5 minutes cycling".
pub fn travel_time_label(distance_meters: f64, mode: TravelMode) -> String {
    format!(
        "{} {}",
        TravelTime::estimate(distance_meters, mode),
        mode.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine, Point};

    #[test]
    fn test_agrees_with_geo_haversine() {
        let ours = distance_meters(52.5200, 13.4050, 48.1351, 11.5820);
        let theirs = Haversine.distance(Point::new(13.4050, 52.5200), Point::new(11.5820, 48.1351));
        // geo uses the IUGG mean radius (6371008.8 m)
        let relative = (ours - theirs).abs() / theirs;
        assert!(relative < 1e-5, "ours={} geo={}", ours, theirs);
    }

    #[test]
    fn test_estimate_rounds_to_minutes() {
        assert_eq!(TravelTime::estimate(0.0, TravelMode::Walking).total_minutes(), 0);
        assert_eq!(TravelTime::estimate(39.0, TravelMode::Walking).total_minutes(), 0);
        assert_eq!(TravelTime::estimate(40.0, TravelMode::Walking).total_minutes(), 1);
        assert_eq!(
            TravelTime::estimate(4_800.0, TravelMode::Walking),
            TravelTime { hours: 1, minutes: 0 }
        );
        assert_eq!(
            TravelTime::estimate(5_000.0, TravelMode::Cycling),
            TravelTime { hours: 0, minutes: 20 }
        );
    }

    #[test]
    fn test_negative_distance_is_zero() {
        assert_eq!(TravelTime::estimate(-100.0, TravelMode::Walking).total_minutes(), 0);
        assert_eq!(TravelTime::estimate(f64::NAN, TravelMode::Walking).total_minutes(), 0);
    }

    #[test]
    fn test_unknown_mode_is_walking() {
        assert_eq!(TravelMode::parse("hovercraft"), TravelMode::Walking);
        assert_eq!(TravelMode::parse("Cycling"), TravelMode::Cycling);
        assert_eq!(TravelMode::parse("transit"), TravelMode::PublicTransport);
    }
}
