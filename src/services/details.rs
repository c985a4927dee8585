// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Green space detail view: weather, distance from the user and a
//! directions link.

use crate::geo_math::{travel_time_label, TravelMode};
use crate::models::green_space::{GreenSpace, LatLng, SizeCategory};
use crate::models::weather::WeatherReport;
use crate::services::weather::WeatherProvider;
use serde::Serialize;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Everything the detail panel shows for one green space.
#[derive(Debug, Clone, Serialize)]
pub struct GreenSpaceDetails {
    #[serde(flatten)]
    pub green_space: GreenSpace,
    pub category_name: &'static str,
    pub size_category: SizeCategory,
    pub anchor: LatLng,
    pub weather: WeatherReport,
    /// Only present when the user location is known
    pub route: Option<RouteInfo>,
}

/// Distance and directions from the user to a green space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteInfo {
    pub distance_meters: f64,
    pub walking_time: String,
    pub directions_url: String,
}

/// Directions link to an external map service.
pub fn directions_url(origin: LatLng, destination: LatLng, mode: TravelMode) -> String {
    let travel_mode = match mode {
        TravelMode::Walking => "walking",
        TravelMode::Cycling => "bicycling",
        TravelMode::PublicTransport => "transit",
        TravelMode::Driving => "driving",
    };

    format!(
        "{}?api=1&origin={}&destination={}&travelmode={}",
        DIRECTIONS_BASE_URL,
        urlencoding::encode(&format!("{},{}", origin.lat, origin.lng)),
        urlencoding::encode(&format!("{},{}", destination.lat, destination.lng)),
        travel_mode
    )
}

/// Route information from `origin` to the green space's anchor.
pub fn route_to(green_space: &GreenSpace, origin: LatLng) -> RouteInfo {
    let destination = green_space.anchor();
    let distance_meters = origin.distance_to(destination);

    RouteInfo {
        distance_meters,
        walking_time: travel_time_label(distance_meters, TravelMode::Walking),
        directions_url: directions_url(origin, destination, TravelMode::Walking),
    }
}

/// Assemble the detail view. Weather failures degrade to the default report.
pub async fn describe(
    green_space: GreenSpace,
    user_location: Option<LatLng>,
    weather: &dyn WeatherProvider,
) -> GreenSpaceDetails {
    let anchor = green_space.anchor();
    let report = weather.get(anchor).await;
    let route = user_location.map(|origin| route_to(&green_space, origin));

    GreenSpaceDetails {
        category_name: green_space.category.display_name(),
        size_category: green_space.size_category(),
        anchor,
        weather: report,
        route,
        green_space,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_url() {
        let url = directions_url(
            LatLng::new(52.52, 13.405),
            LatLng::new(52.5145, 13.3465),
            TravelMode::Cycling,
        );
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&origin=52.52%2C13.405&destination=52.5145%2C13.3465&travelmode=bicycling"
        );
    }

    #[test]
    fn test_directions_default_mode_is_walking() {
        let url = directions_url(
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 1.0),
            TravelMode::default(),
        );
        assert!(url.ends_with("travelmode=walking"));
    }
}
