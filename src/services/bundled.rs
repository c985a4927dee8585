// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Built-in Berlin sample dataset, the last tier of the catalog loader.

use crate::models::green_space::{Category, Footprint, GreenSpace};
use crate::services::source::{DataSource, SourceError};
use async_trait::async_trait;
use geo::{LineString, Polygon};

struct SampleGreenSpace {
    id: u64,
    name: &'static str,
    category: Category,
    /// (min_lng, min_lat, max_lng, max_lat)
    bounds: (f64, f64, f64, f64),
    size_hectares: f64,
    facilities: &'static [&'static str],
    accessibility: &'static [&'static str],
    opening_hours: &'static str,
    description: &'static str,
}

const OPEN_24H: &str = "Open 24 hours";

const SAMPLES: &[SampleGreenSpace] = &[
    SampleGreenSpace {
        id: 1,
        name: "Tiergarten",
        category: Category::Park,
        bounds: (13.3465, 52.5145, 13.3765, 52.5195),
        size_hectares: 210.0,
        facilities: &["playground", "water", "bbq", "sports", "cafe", "toilet"],
        accessibility: &["wheelchair", "parking", "public_transport"],
        opening_hours: OPEN_24H,
        description: "Berlin's most popular inner-city park, covering 210 hectares.",
    },
    SampleGreenSpace {
        id: 2,
        name: "Volkspark Friedrichshain",
        category: Category::Park,
        bounds: (13.4315, 52.5275, 13.4415, 52.5325),
        size_hectares: 52.0,
        facilities: &["playground", "sports", "water", "cafe"],
        accessibility: &["wheelchair", "public_transport"],
        opening_hours: OPEN_24H,
        description: "The oldest public park in Berlin with sports facilities and monuments.",
    },
    SampleGreenSpace {
        id: 3,
        name: "Treptower Park",
        category: Category::Park,
        bounds: (13.4615, 52.4875, 13.4715, 52.4925),
        size_hectares: 84.0,
        facilities: &["playground", "water", "bbq"],
        accessibility: &["wheelchair", "parking", "public_transport"],
        opening_hours: OPEN_24H,
        description: "Large park along the Spree river with the Soviet War Memorial.",
    },
    SampleGreenSpace {
        id: 4,
        name: "Mauerpark",
        category: Category::Park,
        bounds: (13.4015, 52.5405, 13.4065, 52.5455),
        size_hectares: 15.0,
        facilities: &["playground", "sports"],
        accessibility: &["public_transport"],
        opening_hours: OPEN_24H,
        description: "Popular park on the former death strip of the Berlin Wall, famous for its Sunday flea market and karaoke.",
    },
    SampleGreenSpace {
        id: 5,
        name: "Grunewald",
        category: Category::Forest,
        bounds: (13.1965, 52.4795, 13.2565, 52.5095),
        size_hectares: 3000.0,
        facilities: &["water", "sports", "dog"],
        accessibility: &["parking", "public_transport"],
        opening_hours: OPEN_24H,
        description: "Berlin's largest forested area with lakes and hiking trails.",
    },
    SampleGreenSpace {
        id: 6,
        name: "Körnerpark",
        category: Category::Garden,
        bounds: (13.4365, 52.4815, 13.4395, 52.4835),
        size_hectares: 2.4,
        facilities: &["cafe"],
        accessibility: &["wheelchair", "public_transport"],
        opening_hours: "8:00 - 20:00",
        description: "A small but beautiful sunken park with a Baroque design.",
    },
    SampleGreenSpace {
        id: 7,
        name: "Tempelhofer Feld",
        category: Category::Meadow,
        bounds: (13.3915, 52.4695, 13.4215, 52.4795),
        size_hectares: 355.0,
        facilities: &["sports", "bbq", "dog", "bike"],
        accessibility: &["wheelchair", "parking", "public_transport"],
        opening_hours: "6:00 - 21:30 (summer), 7:30 - 19:00 (winter)",
        description: "Former airport turned into a massive public park, popular for cycling, skating, and kite flying.",
    },
    SampleGreenSpace {
        id: 8,
        name: "Viktoriapark",
        category: Category::Park,
        bounds: (13.3815, 52.4875, 13.3865, 52.4905),
        size_hectares: 13.0,
        facilities: &["playground", "water"],
        accessibility: &["public_transport"],
        opening_hours: OPEN_24H,
        description: "Park on a hill with a waterfall and a national monument.",
    },
    SampleGreenSpace {
        id: 9,
        name: "Botanischer Garten",
        category: Category::Garden,
        bounds: (13.3015, 52.4475, 13.3115, 52.4525),
        size_hectares: 43.0,
        facilities: &["cafe", "toilet"],
        accessibility: &["wheelchair", "parking", "public_transport"],
        opening_hours: "9:00 - 19:00 (summer), 9:00 - 16:30 (winter)",
        description: "One of the world's most important botanical gardens with over 22,000 plant species.",
    },
    SampleGreenSpace {
        id: 10,
        name: "Görlitzer Park",
        category: Category::Park,
        bounds: (13.4365, 52.4965, 13.4465, 52.5005),
        size_hectares: 14.0,
        facilities: &["playground", "sports", "dog"],
        accessibility: &["public_transport"],
        opening_hours: OPEN_24H,
        description: "Popular park in Kreuzberg on the site of a former railway station.",
    },
];

/// The bundled dataset. Always available.
pub struct BundledSource;

impl BundledSource {
    pub fn green_spaces(&self) -> Vec<GreenSpace> {
        SAMPLES.iter().map(to_green_space).collect()
    }
}

#[async_trait]
impl DataSource for BundledSource {
    fn describe(&self) -> String {
        "bundled:berlin".to_string()
    }

    async fn acquire_all(&self) -> Result<Vec<GreenSpace>, SourceError> {
        Ok(self.green_spaces())
    }
}

fn to_green_space(sample: &SampleGreenSpace) -> GreenSpace {
    let (min_lng, min_lat, max_lng, max_lat) = sample.bounds;
    // Ring starts at the south-west corner, which becomes the anchor
    let exterior = LineString::from(vec![
        (min_lng, min_lat),
        (min_lng, max_lat),
        (max_lng, max_lat),
        (max_lng, min_lat),
        (min_lng, min_lat),
    ]);

    GreenSpace {
        id: sample.id,
        name: sample.name.to_string(),
        category: sample.category,
        footprint: Footprint::Polygon(Polygon::new(exterior, vec![])),
        size_hectares: sample.size_hectares,
        facilities: sample.facilities.iter().map(|s| s.to_string()).collect(),
        accessibility: sample.accessibility.iter().map(|s| s.to_string()).collect(),
        opening_hours: sample.opening_hours.to_string(),
        description: sample.description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_ids_unique() {
        let green_spaces = BundledSource.green_spaces();
        assert_eq!(green_spaces.len(), 10);
        let ids: HashSet<u64> = green_spaces.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), green_spaces.len());
    }

    #[test]
    fn test_bundled_anchor_is_south_west_corner() {
        let green_spaces = BundledSource.green_spaces();
        let tiergarten = &green_spaces[0];
        assert_eq!(tiergarten.anchor().lat, 52.5145);
        assert_eq!(tiergarten.anchor().lng, 13.3465);
    }
}
