//! Append-only record of placements made during one population run.

use glam::DVec3;
use hashbrown::HashMap;

use crate::Category;

/// A placed instance. Never mutated after it enters the ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementRecord {
    pub category: Category,
    /// `x`/`y` on the ground plane, `z` vertical.
    pub position: DVec3,
    /// Placed by the unconstrained fallback rather than by accepted search.
    pub fallback: bool,
}

impl PlacementRecord {
    pub fn accepted(category: Category, position: DVec3) -> Self {
        Self {
            category,
            position,
            fallback: false,
        }
    }

    pub fn fallback(category: Category, position: DVec3) -> Self {
        Self {
            category,
            position,
            fallback: true,
        }
    }

    /// Planar distance from this record to `(x, y)`.
    pub fn planar_distance(&self, x: f64, y: f64) -> f64 {
        ((self.position.x - x).powi(2) + (self.position.y - y).powi(2)).sqrt()
    }
}

/// Placements per category, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    records: HashMap<Category, Vec<PlacementRecord>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every placement of `category`, oldest first.
    pub fn all_of(&self, category: Category) -> &[PlacementRecord] {
        self.records.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Append a record.
    pub fn add(&mut self, record: PlacementRecord) {
        self.records.entry(record.category).or_default().push(record);
    }

    /// Drop every record in every category.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn len_of(&self, category: Category) -> usize {
        self.all_of(category).len()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records that came from the fallback path.
    pub fn fallback_count(&self) -> usize {
        self.records
            .values()
            .flatten()
            .filter(|r| r.fallback)
            .count()
    }

    /// Placement counts for every category, in [`Category::ALL`] order.
    pub fn counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.len_of(c)))
            .collect()
    }
}
