// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filter criteria and filter results.

use crate::geo_math::TravelTime;
use crate::models::green_space::{GreenSpace, LatLng, SizeCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Criteria for one filtering pass. Empty sets and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FilterSpec {
    /// Free text, usually an address, resolved through geocoding
    #[validate(length(max = 200))]
    pub search_text: String,
    /// Only keep green spaces within this distance of the user location
    #[validate(range(min = 0.0))]
    pub max_distance_meters: Option<f64>,
    /// Keep green spaces in any of these size classes
    pub size_categories: BTreeSet<SizeCategory>,
    /// Keep green spaces offering all of these facilities
    pub required_facilities: BTreeSet<String>,
    /// Keep green spaces offering all of these accessibility features
    pub required_accessibility: BTreeSet<String>,
    /// Case-insensitive substring of the green space name
    #[validate(length(max = 100))]
    pub name_contains: Option<String>,
}

impl FilterSpec {
    /// Check that the criteria are well-formed before running them.
    pub fn check(&self) -> Result<(), FilterSpecError> {
        self.validate()?;
        if self.max_distance_meters.is_some_and(|d| !d.is_finite()) {
            return Err(FilterSpecError::DistanceNotFinite);
        }
        Ok(())
    }

    /// True when no criterion would exclude anything.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.max_distance_meters.is_none()
            && self.size_categories.is_empty()
            && self.required_facilities.is_empty()
            && self.required_accessibility.is_empty()
            && self
                .name_contains
                .as_deref()
                .is_none_or(|n| n.trim().is_empty())
    }
}

/// Malformed filter criteria.
#[derive(Debug, thiserror::Error)]
pub enum FilterSpecError {
    #[error("Invalid filter: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("max_distance_meters must be a finite number")]
    DistanceNotFinite,
}

/// What happened to the free-text search of a filter pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchAnchor {
    /// No search text was given
    NotRequested,
    /// The search text resolved to this coordinate
    Resolved(LatLng),
    /// The search text could not be geocoded; results are unranked
    NotResolved,
}

impl SearchAnchor {
    pub fn location(&self) -> Option<LatLng> {
        match self {
            SearchAnchor::Resolved(loc) => Some(*loc),
            _ => None,
        }
    }
}

/// A green space that passed a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGreenSpace {
    #[serde(flatten)]
    pub green_space: GreenSpace,
    /// Distance from the resolved search location, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_to_searched: Option<f64>,
}

/// Result of a filter pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome {
    pub results: Vec<RankedGreenSpace>,
    pub search: SearchAnchor,
}

impl FilterOutcome {
    /// The filtered green spaces in result order.
    pub fn green_spaces(&self) -> Vec<GreenSpace> {
        self.results.iter().map(|r| r.green_space.clone()).collect()
    }

    pub fn address_not_found(&self) -> bool {
        matches!(self.search, SearchAnchor::NotResolved)
    }
}

/// Nearest green space to a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestGreenSpace {
    pub green_space: GreenSpace,
    pub distance_meters: f64,
    pub travel_time: TravelTime,
    pub travel_time_label: String,
}
