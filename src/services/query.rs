// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query engine: multi-criteria filtering and nearest green space lookup.
//!
//! A green space is kept only if it passes every filter group:
//! - distance: within `max_distance_meters` of the user location, when both are set
//! - size: in any selected size category
//! - facilities / accessibility: has every required tag
//! - name: contains `name_contains` (case-insensitive)
//!
//! When the search text resolves to a coordinate, results are ranked by
//! distance from it. Otherwise catalog order is kept.

use crate::geo_math::{travel_time_label, TravelMode, TravelTime};
use crate::models::filter::{
    FilterOutcome, FilterSpec, FilterSpecError, NearestGreenSpace, RankedGreenSpace, SearchAnchor,
};
use crate::models::green_space::{GreenSpace, LatLng};
use crate::services::catalog::Catalog;
use crate::services::geocoding::AddressResolver;
use std::collections::BTreeSet;

/// Filter the full catalog collection.
///
/// Geocoding failure is not an error: the outcome carries
/// `SearchAnchor::NotResolved` and the other criteria still apply.
/// The caller decides whether to commit the result to the catalog.
pub async fn filter(
    catalog: &Catalog,
    spec: &FilterSpec,
    user_location: Option<LatLng>,
    resolver: &dyn AddressResolver,
) -> Result<FilterOutcome, FilterSpecError> {
    spec.check()?;
    let search = resolve_search(&spec.search_text, resolver).await;
    Ok(apply(catalog.all(), spec, user_location, search))
}

/// Resolve the free-text search. Blank text is not sent to the resolver.
pub async fn resolve_search(text: &str, resolver: &dyn AddressResolver) -> SearchAnchor {
    let text = text.trim();
    if text.is_empty() {
        return SearchAnchor::NotRequested;
    }

    match resolver.resolve(text).await {
        Some(location) => SearchAnchor::Resolved(location),
        None => SearchAnchor::NotResolved,
    }
}

/// Apply the predicates and ranking to a collection with an already
/// resolved search anchor.
pub fn apply(
    green_spaces: &[GreenSpace],
    spec: &FilterSpec,
    user_location: Option<LatLng>,
    search: SearchAnchor,
) -> FilterOutcome {
    let name_query = spec
        .name_contains
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_lowercase);

    let mut results: Vec<RankedGreenSpace> = green_spaces
        .iter()
        .filter(|g| within_distance(g, user_location, spec.max_distance_meters))
        .filter(|g| matches_size(g, spec))
        .filter(|g| has_all(&g.facilities, &spec.required_facilities))
        .filter(|g| has_all(&g.accessibility, &spec.required_accessibility))
        .filter(|g| {
            name_query
                .as_deref()
                .is_none_or(|q| g.name.to_lowercase().contains(q))
        })
        .map(|g| RankedGreenSpace {
            green_space: g.clone(),
            distance_to_searched: search.location().map(|loc| loc.distance_to(g.anchor())),
        })
        .collect();

    if search.location().is_some() {
        // Stable: equal distances keep catalog order
        results.sort_by(|a, b| {
            let da = a.distance_to_searched.unwrap_or(f64::INFINITY);
            let db = b.distance_to_searched.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
        });
    }

    tracing::debug!(
        total = green_spaces.len(),
        matched = results.len(),
        search = ?search,
        "Applied filters"
    );

    FilterOutcome { results, search }
}

/// Distance filter. Inert unless both the user location and a maximum are set.
pub fn within_distance(
    green_space: &GreenSpace,
    user_location: Option<LatLng>,
    max_distance_meters: Option<f64>,
) -> bool {
    match (user_location, max_distance_meters) {
        (Some(origin), Some(max)) => origin.distance_to(green_space.anchor()) <= max,
        _ => true,
    }
}

/// Size filter. Any selected category may match; no selection matches all.
pub fn matches_size(green_space: &GreenSpace, spec: &FilterSpec) -> bool {
    spec.size_categories.is_empty()
        || spec
            .size_categories
            .iter()
            .any(|c| c.contains(green_space.size_hectares))
}

fn has_all(available: &BTreeSet<String>, required: &BTreeSet<String>) -> bool {
    required.is_subset(available)
}

/// The green space closest to `(lat, lng)` over the full collection.
///
/// On exact ties the first one in catalog order wins. `None` only when the
/// catalog is empty.
pub fn find_nearest(catalog: &Catalog, lat: f64, lng: f64) -> Option<NearestGreenSpace> {
    let origin = LatLng::new(lat, lng);

    let mut nearest: Option<(&GreenSpace, f64)> = None;
    for green_space in catalog.all() {
        let distance = origin.distance_to(green_space.anchor());
        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((green_space, distance));
        }
    }

    nearest.map(|(green_space, distance)| NearestGreenSpace {
        green_space: green_space.clone(),
        distance_meters: distance,
        travel_time: TravelTime::estimate(distance, TravelMode::Walking),
        travel_time_label: travel_time_label(distance, TravelMode::Walking),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::green_space::{Category, Footprint, SizeCategory};
    use async_trait::async_trait;
    use geo::Point;

    struct FixedResolver(Option<LatLng>);

    #[async_trait]
    impl AddressResolver for FixedResolver {
        async fn resolve(&self, _text: &str) -> Option<LatLng> {
            self.0
        }
    }

    fn space(id: u64, lat: f64, lng: f64, size: f64, facilities: &[&str]) -> GreenSpace {
        GreenSpace {
            id,
            name: format!("Space {}", id),
            category: Category::Park,
            footprint: Footprint::Point(Point::new(lng, lat)),
            size_hectares: size,
            facilities: facilities.iter().map(|s| s.to_string()).collect(),
            accessibility: BTreeSet::new(),
            opening_hours: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_size_or_within_group() {
        let spec = FilterSpec {
            size_categories: [SizeCategory::Small, SizeCategory::Large].into(),
            ..Default::default()
        };
        assert!(matches_size(&space(1, 0.0, 0.0, 0.5, &[]), &spec));
        assert!(!matches_size(&space(2, 0.0, 0.0, 5.0, &[]), &spec));
        assert!(matches_size(&space(3, 0.0, 0.0, 50.0, &[]), &spec));
    }

    #[test]
    fn test_distance_filter_needs_both_inputs() {
        let far = space(1, 10.0, 10.0, 1.0, &[]);
        assert!(within_distance(&far, None, Some(1.0)));
        assert!(within_distance(&far, Some(LatLng::new(0.0, 0.0)), None));
        assert!(!within_distance(&far, Some(LatLng::new(0.0, 0.0)), Some(1.0)));
    }

    #[test]
    fn test_distance_filter_is_inclusive() {
        let origin = LatLng::new(52.5, 13.4);
        let target = space(1, 52.51, 13.4, 1.0, &[]);
        let exact = origin.distance_to(target.anchor());
        assert!(within_distance(&target, Some(origin), Some(exact)));
    }

    #[test]
    fn test_name_filter_case_insensitive() {
        let spaces = vec![space(1, 0.0, 0.0, 1.0, &[]), space(22, 0.0, 0.0, 1.0, &[])];
        let spec = FilterSpec {
            name_contains: Some("SPACE 2".to_string()),
            ..Default::default()
        };
        let outcome = apply(&spaces, &spec, None, SearchAnchor::NotRequested);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].green_space.id, 22);
    }

    #[tokio::test]
    async fn test_blank_search_text_skips_resolver() {
        let catalog = Catalog::new(vec![space(1, 0.0, 0.0, 1.0, &[])]);
        let spec = FilterSpec {
            search_text: "   ".to_string(),
            ..Default::default()
        };
        let resolver = FixedResolver(Some(LatLng::new(1.0, 1.0)));
        let outcome = filter(&catalog, &spec, None, &resolver).await.unwrap();
        assert_eq!(outcome.search, SearchAnchor::NotRequested);
        assert_eq!(outcome.results[0].distance_to_searched, None);
    }

    #[tokio::test]
    async fn test_invalid_spec_is_error() {
        let catalog = Catalog::new(vec![space(1, 0.0, 0.0, 1.0, &[])]);
        let spec = FilterSpec {
            max_distance_meters: Some(-1.0),
            ..Default::default()
        };
        let result = filter(&catalog, &spec, None, &FixedResolver(None)).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_nearest_empty_catalog() {
        assert!(find_nearest(&Catalog::default(), 52.5, 13.4).is_none());
    }

    #[test]
    fn test_nearest_reports_travel_time() {
        let catalog = Catalog::new(vec![space(1, 52.5, 13.4, 1.0, &[])]);
        let nearest = find_nearest(&catalog, 52.5, 13.4).unwrap();
        assert_eq!(nearest.distance_meters, 0.0);
        assert_eq!(nearest.travel_time_label, "less than a minute walking");
    }
}
