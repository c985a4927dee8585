// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod filter;
pub mod green_space;
pub mod weather;

pub use filter::{FilterOutcome, FilterSpec, NearestGreenSpace, RankedGreenSpace, SearchAnchor};
pub use green_space::{Category, Footprint, GreenSpace, LatLng, SizeCategory};
pub use weather::{WeatherReport, WeatherSource};
