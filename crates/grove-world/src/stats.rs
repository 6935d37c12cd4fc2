//! Placement statistics summarizing an assembled scene.

use std::collections::BTreeSet;
use std::fmt;

use grove_scatter::{Category, Scene};

/// Per-category tallies of an assembled scene.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub total: usize,
    pub fallbacks: usize,
    /// `(category, placed, distinct variants)` for every category, in
    /// [`Category::ALL`] order.
    pub categories: Vec<(Category, usize, usize)>,
}

impl SceneStatistics {
    pub fn from_scene(scene: &Scene) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let mut variants = BTreeSet::new();
                let mut placed = 0;
                for entry in scene.entries_of(category) {
                    placed += 1;
                    variants.insert(entry.variant.as_str());
                }
                (category, placed, variants.len())
            })
            .collect();
        Self {
            total: scene.entries.len(),
            fallbacks: scene.entries.iter().filter(|e| e.fallback).count(),
            categories,
        }
    }

    pub fn placed(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|(c, _, _)| *c == category)
            .map_or(0, |(_, placed, _)| *placed)
    }

    pub fn distinct_variants(&self, category: Category) -> usize {
        self.categories
            .iter()
            .find(|(c, _, _)| *c == category)
            .map_or(0, |(_, _, variants)| *variants)
    }

    /// Emit one summary line plus one line per non-empty category.
    pub fn log(&self) {
        tracing::info!(total = self.total, fallbacks = self.fallbacks, "Scene assembled");
        for &(category, placed, variants) in &self.categories {
            if placed > 0 {
                tracing::info!(%category, placed, variants, "Category summary");
            }
        }
    }
}

impl fmt::Display for SceneStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} objects", self.total)?;
        for &(category, placed, variants) in &self.categories {
            if placed > 0 {
                write!(f, ", {category}: {placed} ({variants} variants)")?;
            }
        }
        if self.fallbacks > 0 {
            write!(f, ", {} fallback", self.fallbacks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;
    use grove_scatter::{Rotation, SceneEntry};

    use super::*;

    fn entry(category: Category, variant: &str, index: u32, fallback: bool) -> SceneEntry {
        SceneEntry {
            category,
            variant: variant.into(),
            index,
            position: DVec3::ZERO,
            rotation: Rotation::default(),
            scale: 1.0,
            fallback,
        }
    }

    #[test]
    fn test_counts_and_distinct_variants() {
        let scene = Scene {
            entries: vec![
                entry(Category::Tree, "oak", 0, false),
                entry(Category::Tree, "oak", 1, false),
                entry(Category::Tree, "pine", 2, true),
                entry(Category::Grass, "rye", 0, false),
            ],
            ..Scene::default()
        };
        let stats = SceneStatistics::from_scene(&scene);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.fallbacks, 1);
        assert_eq!(stats.placed(Category::Tree), 3);
        assert_eq!(stats.distinct_variants(Category::Tree), 2);
        assert_eq!(stats.placed(Category::Grass), 1);
        assert_eq!(stats.placed(Category::Rock), 0);
        assert_eq!(stats.categories.len(), Category::ALL.len());
    }

    #[test]
    fn test_display_skips_empty_categories() {
        let scene = Scene {
            entries: vec![entry(Category::Rock, "boulder", 0, false)],
            ..Scene::default()
        };
        let text = SceneStatistics::from_scene(&scene).to_string();
        assert_eq!(text, "1 objects, rock: 1 (1 variants)");
    }

    #[test]
    fn test_empty_scene() {
        let stats = SceneStatistics::from_scene(&Scene::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.to_string(), "0 objects");
    }
}
