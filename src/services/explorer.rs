// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context: the catalog plus the user's location.

use crate::models::filter::{
    FilterOutcome, FilterSpec, FilterSpecError, NearestGreenSpace, SearchAnchor,
};
use crate::models::green_space::LatLng;
use crate::services::catalog::Catalog;
use crate::services::geocoding::AddressResolver;
use crate::services::query;
use crate::services::source::CatalogLoader;

/// Owns all mutable session state. Filtering reads `&self`; committing a
/// result or changing the location needs `&mut self`.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    catalog: Catalog,
    user_location: Option<LatLng>,
}

impl Explorer {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            user_location: None,
        }
    }

    /// Load the catalog through the loader tiers.
    pub async fn load(loader: &CatalogLoader) -> Self {
        Self::new(Catalog::load(loader).await)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn set_user_location(&mut self, location: LatLng) {
        tracing::debug!(lat = location.lat, lng = location.lng, "User location set");
        self.user_location = Some(location);
    }

    pub fn clear_user_location(&mut self) {
        self.user_location = None;
    }

    /// Run a filter pass without committing it.
    pub async fn filter(
        &self,
        spec: &FilterSpec,
        resolver: &dyn AddressResolver,
    ) -> Result<FilterOutcome, FilterSpecError> {
        query::filter(&self.catalog, spec, self.user_location, resolver).await
    }

    /// Run a filter pass with an already resolved search anchor.
    ///
    /// The spec must have passed `FilterSpec::check`.
    pub fn filter_resolved(&self, spec: &FilterSpec, search: SearchAnchor) -> FilterOutcome {
        query::apply(self.catalog.all(), spec, self.user_location, search)
    }

    /// Make a filter result the active subset.
    pub fn commit(&mut self, outcome: &FilterOutcome) {
        self.catalog.commit_filtered(outcome.green_spaces());
    }

    /// Filter and commit in one step.
    pub async fn apply_filter(
        &mut self,
        spec: &FilterSpec,
        resolver: &dyn AddressResolver,
    ) -> Result<FilterOutcome, FilterSpecError> {
        let outcome = self.filter(spec, resolver).await?;
        self.commit(&outcome);
        Ok(outcome)
    }

    pub fn reset_filters(&mut self) {
        self.catalog.reset_filtered();
    }

    pub fn nearest(&self, lat: f64, lng: f64) -> Option<NearestGreenSpace> {
        query::find_nearest(&self.catalog, lat, lng)
    }

    /// Nearest green space to the user, if the location is known.
    pub fn nearest_to_user(&self) -> Option<NearestGreenSpace> {
        self.user_location
            .and_then(|loc| self.nearest(loc.lat, loc.lng))
    }
}
