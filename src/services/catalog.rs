// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory green space catalog: the full collection and the active subset.

use crate::models::green_space::GreenSpace;
use crate::services::source::{CatalogLoader, LoadTier, LoadedCollection};
use std::collections::HashMap;

/// The loaded collection plus the currently filtered subset.
///
/// `all` is fixed once loaded. `filtered` is only ever replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    all: Vec<GreenSpace>,
    filtered: Vec<GreenSpace>,
    index: HashMap<u64, usize>,
    tier: Option<LoadTier>,
    source: Option<String>,
}

impl Catalog {
    /// Build a loaded catalog from a collection (load order is kept).
    pub fn new(green_spaces: Vec<GreenSpace>) -> Self {
        let mut index = HashMap::with_capacity(green_spaces.len());
        for (pos, green_space) in green_spaces.iter().enumerate() {
            index.entry(green_space.id).or_insert(pos);
        }

        Self {
            filtered: green_spaces.clone(),
            all: green_spaces,
            index,
            tier: None,
            source: None,
        }
    }

    pub fn from_collection(collection: LoadedCollection) -> Self {
        let mut catalog = Self::new(collection.green_spaces);
        catalog.tier = Some(collection.tier);
        catalog.source = Some(collection.source);
        catalog
    }

    /// Acquire the collection through the loader's tiers.
    pub async fn load(loader: &CatalogLoader) -> Self {
        Self::from_collection(loader.load().await)
    }

    pub fn all(&self) -> &[GreenSpace] {
        &self.all
    }

    pub fn filtered(&self) -> &[GreenSpace] {
        &self.filtered
    }

    pub fn get_by_id(&self, id: u64) -> Option<&GreenSpace> {
        self.index.get(&id).map(|&pos| &self.all[pos])
    }

    /// Replace the active subset with a filter result.
    pub fn commit_filtered(&mut self, green_spaces: Vec<GreenSpace>) {
        self.filtered = green_spaces;
    }

    /// Make the active subset equal to the full collection again.
    pub fn reset_filtered(&mut self) {
        self.filtered = self.all.clone();
    }

    /// The loader tier that produced this catalog, if it came from a loader.
    pub fn load_tier(&self) -> Option<LoadTier> {
        self.tier
    }

    /// Description of the source the collection came from.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::bundled::BundledSource;

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.filtered().is_empty());
        assert!(catalog.get_by_id(1).is_none());
        assert_eq!(catalog.load_tier(), None);
    }

    #[test]
    fn test_filtered_starts_as_all() {
        let catalog = Catalog::new(BundledSource.green_spaces());
        assert_eq!(catalog.all(), catalog.filtered());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::new(BundledSource.green_spaces());
        assert_eq!(catalog.get_by_id(7).map(|g| g.name.as_str()), Some("Tempelhofer Feld"));
        assert!(catalog.get_by_id(999).is_none());
    }

    #[test]
    fn test_commit_and_reset() {
        let mut catalog = Catalog::new(BundledSource.green_spaces());
        let first = catalog.all()[..2].to_vec();
        catalog.commit_filtered(first.clone());
        assert_eq!(catalog.filtered(), first.as_slice());
        assert_eq!(catalog.len(), 10);

        catalog.reset_filtered();
        assert_eq!(catalog.all(), catalog.filtered());
    }
}
