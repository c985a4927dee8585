// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Green space model and geometry handling.

use geo::{MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to another coordinate in meters.
    pub fn distance_to(&self, other: LatLng) -> f64 {
        crate::geo_math::distance_meters(self.lat, self.lng, other.lat, other.lng)
    }
}

/// A point of interest in the catalog (park, garden, forest, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreenSpace {
    pub id: u64,
    pub name: String,
    pub category: Category,
    /// Boundary or location in (longitude, latitude)
    pub footprint: Footprint,
    pub size_hectares: f64,
    pub facilities: BTreeSet<String>,
    pub accessibility: BTreeSet<String>,
    pub opening_hours: String,
    pub description: String,
}

impl GreenSpace {
    /// The coordinate used for all distance math.
    pub fn anchor(&self) -> LatLng {
        self.footprint.anchor()
    }

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::of(self.size_hectares)
    }
}

/// Green space geometry.
///
/// Every polygon carries a non-empty exterior ring. The GeoJSON loader
/// rejects geometries that don't, so `anchor()` never sees one.
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    Point(Point<f64>),
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Footprint {
    /// First vertex of the first exterior ring, or the point itself.
    ///
    /// This is not a centroid; large polygons anchor at a corner.
    ///
    /// # Panics
    ///
    /// Panics if the geometry has no vertices.
    pub fn anchor(&self) -> LatLng {
        let coord = match self {
            Footprint::Point(p) => p.0,
            Footprint::Polygon(p) => p.exterior().0[0],
            Footprint::MultiPolygon(mp) => mp.0[0].exterior().0[0],
        };
        LatLng::new(coord.y, coord.x)
    }

    /// Whether the geometry has at least one vertex to anchor on.
    pub fn has_anchor(&self) -> bool {
        match self {
            Footprint::Point(_) => true,
            Footprint::Polygon(p) => !p.exterior().0.is_empty(),
            Footprint::MultiPolygon(mp) => mp
                .0
                .first()
                .is_some_and(|p| !p.exterior().0.is_empty()),
        }
    }
}

impl Serialize for Footprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            Footprint::Point(p) => geojson::Value::from(p),
            Footprint::Polygon(p) => geojson::Value::from(p),
            Footprint::MultiPolygon(mp) => geojson::Value::from(mp),
        };
        geojson::Geometry::new(value).serialize(serializer)
    }
}

/// Kind of green space. Drives display color and label only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Park,
    Garden,
    Forest,
    Playground,
    Cemetery,
    Meadow,
    BbqArea,
    #[serde(other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Park,
        Category::Garden,
        Category::Forest,
        Category::Playground,
        Category::Cemetery,
        Category::Meadow,
        Category::BbqArea,
        Category::Other,
    ];

    /// Parse a category name from source data. Unknown names map to `Other`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "park" => Category::Park,
            "garden" => Category::Garden,
            "forest" => Category::Forest,
            "playground" => Category::Playground,
            "cemetery" => Category::Cemetery,
            "meadow" => Category::Meadow,
            "bbq_area" => Category::BbqArea,
            _ => Category::Other,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Park => "Park",
            Category::Garden => "Garten",
            Category::Forest => "Wald",
            Category::Playground => "Spielplatz",
            Category::Cemetery => "Friedhof",
            Category::Meadow => "Wiese",
            Category::BbqArea => "Grillfläche",
            Category::Other => "Andere Grünfläche",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Park => "#7CB342",
            Category::Garden => "#8BC34A",
            Category::Forest => "#33691E",
            Category::Playground => "#FFCA28",
            Category::Cemetery => "#78909C",
            Category::Meadow => "#AED581",
            Category::BbqArea => "#FF5722",
            Category::Other => "#A5D6A7",
        }
    }
}

/// Size class of a green space, using half-open hectare ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    /// [0, 1) ha
    Small,
    /// [1, 10) ha
    Medium,
    /// [10, ∞) ha
    Large,
}

impl SizeCategory {
    /// Lower (inclusive) and upper (exclusive) bounds in hectares.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            SizeCategory::Small => (0.0, 1.0),
            SizeCategory::Medium => (1.0, 10.0),
            SizeCategory::Large => (10.0, f64::INFINITY),
        }
    }

    pub fn contains(self, hectares: f64) -> bool {
        let (min, max) = self.bounds();
        hectares >= min && hectares < max
    }

    /// The category a size falls in.
    pub fn of(hectares: f64) -> Self {
        if hectares < 1.0 {
            SizeCategory::Small
        } else if hectares < 10.0 {
            SizeCategory::Medium
        } else {
            SizeCategory::Large
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_polygon_anchor_is_first_vertex() {
        let footprint = Footprint::Polygon(polygon![
            (x: 13.3465, y: 52.5145),
            (x: 13.3465, y: 52.5195),
            (x: 13.3765, y: 52.5195),
        ]);
        assert_eq!(footprint.anchor(), LatLng::new(52.5145, 13.3465));
    }

    #[test]
    fn test_point_anchor() {
        let footprint = Footprint::Point(Point::new(13.4, 52.5));
        assert_eq!(footprint.anchor(), LatLng::new(52.5, 13.4));
        assert!(footprint.has_anchor());
    }

    #[test]
    fn test_empty_polygon_has_no_anchor() {
        let footprint = Footprint::Polygon(Polygon::new(geo::LineString::new(vec![]), vec![]));
        assert!(!footprint.has_anchor());
        assert!(!Footprint::MultiPolygon(MultiPolygon::new(vec![])).has_anchor());
    }

    #[test]
    fn test_size_boundaries_are_half_open() {
        assert!(SizeCategory::Medium.contains(1.0));
        assert!(!SizeCategory::Small.contains(1.0));
        assert!(SizeCategory::Small.contains(0.999));
        assert!(SizeCategory::Large.contains(10.0));
        assert!(!SizeCategory::Medium.contains(10.0));
        assert_eq!(SizeCategory::of(0.0), SizeCategory::Small);
        assert_eq!(SizeCategory::of(9.99), SizeCategory::Medium);
        assert_eq!(SizeCategory::of(3000.0), SizeCategory::Large);
    }

    #[test]
    fn test_unknown_category_is_other() {
        assert_eq!(Category::parse("dog_park"), Category::Other);
        assert_eq!(Category::parse("BBQ_AREA"), Category::BbqArea);
        let parsed: Category = serde_json::from_str("\"skate_park\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }

    #[test]
    fn test_footprint_serializes_as_geojson() {
        let footprint = Footprint::Point(Point::new(13.4, 52.5));
        let json = serde_json::to_value(&footprint).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["coordinates"][0], 13.4);
        assert_eq!(json["coordinates"][1], 52.5);
    }
}
