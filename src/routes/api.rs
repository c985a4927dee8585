// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API over the green space explorer.

use crate::error::{AppError, Result};
use crate::models::filter::{FilterSpec, NearestGreenSpace, RankedGreenSpace, SearchAnchor};
use crate::models::green_space::{Category, GreenSpace, LatLng};
use crate::services::details::{self, GreenSpaceDetails};
use crate::services::query;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(get_categories))
        .route("/api/green-spaces", get(get_filtered))
        .route("/api/green-spaces/all", get(get_all))
        .route("/api/green-spaces/{id}", get(get_details))
        .route("/api/filter", post(apply_filter))
        .route("/api/filter/reset", post(reset_filter))
        .route("/api/nearest", get(get_nearest))
        .route(
            "/api/location",
            get(get_location).put(set_location).delete(clear_location),
        )
}

// ─── Categories ──────────────────────────────────────────────

/// Display information for a green space category.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategoryInfo {
    pub id: Category,
    pub name: String,
    pub color: String,
}

async fn get_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        Category::ALL
            .iter()
            .map(|&c| CategoryInfo {
                id: c,
                name: c.display_name().to_string(),
                color: c.color().to_string(),
            })
            .collect(),
    )
}

// ─── Green Spaces ────────────────────────────────────────────

#[derive(Serialize)]
pub struct GreenSpacesResponse {
    pub count: usize,
    pub green_spaces: Vec<GreenSpace>,
}

impl GreenSpacesResponse {
    fn new(green_spaces: &[GreenSpace]) -> Self {
        Self {
            count: green_spaces.len(),
            green_spaces: green_spaces.to_vec(),
        }
    }
}

/// Currently active (filtered) green spaces.
async fn get_filtered(State(state): State<Arc<AppState>>) -> Json<GreenSpacesResponse> {
    let explorer = state.explorer.read().await;
    Json(GreenSpacesResponse::new(explorer.catalog().filtered()))
}

/// The full collection, ignoring filters.
async fn get_all(State(state): State<Arc<AppState>>) -> Json<GreenSpacesResponse> {
    let explorer = state.explorer.read().await;
    Json(GreenSpacesResponse::new(explorer.catalog().all()))
}

/// Detail view with weather and, if the user location is known, a route.
async fn get_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<GreenSpaceDetails>> {
    let (green_space, user_location) = {
        let explorer = state.explorer.read().await;
        let green_space = explorer
            .catalog()
            .get_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Green space {} not found", id)))?;
        (green_space, explorer.user_location())
    };

    let details = details::describe(green_space, user_location, state.weather.as_ref()).await;
    Ok(Json(details))
}

// ─── Filtering ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct FilterResponse {
    pub count: usize,
    /// True when search text was given but could not be geocoded
    pub address_not_found: bool,
    pub search: SearchAnchor,
    pub results: Vec<RankedGreenSpace>,
}

/// Filter the catalog and make the result the active subset.
async fn apply_filter(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<FilterSpec>,
) -> Result<Json<FilterResponse>> {
    spec.check()?;
    tracing::debug!(?spec, unconstrained = spec.is_unconstrained(), "Applying filter");

    // Geocode before locking; the resolver can take up to the HTTP timeout
    let search = query::resolve_search(&spec.search_text, state.resolver.as_ref()).await;

    let outcome = {
        let mut explorer = state.explorer.write().await;
        let outcome = explorer.filter_resolved(&spec, search);
        explorer.commit(&outcome);
        outcome
    };

    tracing::info!(
        count = outcome.results.len(),
        address_not_found = outcome.address_not_found(),
        "Filter applied"
    );

    Ok(Json(FilterResponse {
        count: outcome.results.len(),
        address_not_found: outcome.address_not_found(),
        search: outcome.search,
        results: outcome.results,
    }))
}

/// Clear all filters.
async fn reset_filter(State(state): State<Arc<AppState>>) -> Json<GreenSpacesResponse> {
    let mut explorer = state.explorer.write().await;
    explorer.reset_filters();
    Json(GreenSpacesResponse::new(explorer.catalog().filtered()))
}

// ─── Nearest ─────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct NearestQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    lng: Option<f64>,
}

/// Nearest green space to the given point, or to the user location.
async fn get_nearest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestQuery>,
) -> Result<Json<NearestGreenSpace>> {
    params.validate()?;
    // Range checks let NaN through
    if params.lat.into_iter().chain(params.lng).any(|v| !v.is_finite()) {
        return Err(AppError::BadRequest(
            "'lat' and 'lng' must be finite numbers".to_string(),
        ));
    }

    let explorer = state.explorer.read().await;
    let origin = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => LatLng::new(lat, lng),
        (None, None) => explorer.user_location().ok_or_else(|| {
            AppError::BadRequest("Location unavailable: pass lat/lng or set a location".to_string())
        })?,
        _ => {
            return Err(AppError::BadRequest(
                "Both 'lat' and 'lng' are required".to_string(),
            ))
        }
    };

    let nearest = explorer
        .nearest(origin.lat, origin.lng)
        .ok_or_else(|| AppError::NotFound("No green spaces loaded".to_string()))?;
    Ok(Json(nearest))
}

// ─── User Location ───────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct LocationInput {
    #[validate(range(min = -90.0, max = 90.0))]
    lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    lng: f64,
}

#[derive(Serialize)]
pub struct LocationResponse {
    pub location: Option<LatLng>,
}

async fn get_location(State(state): State<Arc<AppState>>) -> Json<LocationResponse> {
    let location = state.explorer.read().await.user_location();
    Json(LocationResponse { location })
}

async fn set_location(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LocationInput>,
) -> Result<Json<LocationResponse>> {
    input.validate()?;

    let location = LatLng::new(input.lat, input.lng);
    state.explorer.write().await.set_user_location(location);
    Ok(Json(LocationResponse {
        location: Some(location),
    }))
}

async fn clear_location(State(state): State<Arc<AppState>>) -> Json<LocationResponse> {
    state.explorer.write().await.clear_user_location();
    Json(LocationResponse { location: None })
}
