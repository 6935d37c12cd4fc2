//! Scenery categories and their fixed placement constants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five scenery categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tree,
    Bush,
    Grass,
    Rock,
    Sand,
}

/// Per-category engine constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryProfile {
    /// Uniform scale range `[min, max]`.
    pub scale_range: (f64, f64),
    /// Minimum planar spacing to other instances of the same category.
    pub min_distance: f64,
    /// Probability of drawing an edge candidate instead of an interior one.
    pub edge_weight: f64,
    /// Vertical offset band added to the sampled surface height.
    pub height_jitter: (f64, f64),
    /// Half-width of the shared roll/pitch tilt band. Zero means level.
    pub max_tilt: f64,
}

const TREE: CategoryProfile = CategoryProfile {
    scale_range: (0.8, 1.5),
    min_distance: 3.0,
    edge_weight: 0.2,
    height_jitter: (-0.08, 0.08),
    max_tilt: 0.05,
};

const BUSH: CategoryProfile = CategoryProfile {
    scale_range: (0.3, 1.0),
    min_distance: 2.0,
    edge_weight: 0.4,
    height_jitter: (-0.08, 0.08),
    max_tilt: 0.0,
};

const GRASS: CategoryProfile = CategoryProfile {
    scale_range: (0.2, 0.6),
    min_distance: 0.5,
    edge_weight: 0.5,
    height_jitter: (-0.05, 0.05),
    max_tilt: 0.0,
};

const ROCK: CategoryProfile = CategoryProfile {
    scale_range: (0.5, 2.0),
    min_distance: 4.0,
    edge_weight: 0.8,
    height_jitter: (-0.1, 0.1),
    max_tilt: 0.15,
};

const SAND: CategoryProfile = CategoryProfile {
    scale_range: (1.0, 2.5),
    min_distance: 3.0,
    edge_weight: 0.7,
    height_jitter: (-0.2, 0.0),
    max_tilt: 0.0,
};

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Tree,
        Category::Bush,
        Category::Grass,
        Category::Rock,
        Category::Sand,
    ];

    /// Order in which the assembler fills categories. Sand and rock go first
    /// so trees and bushes can keep clear of them.
    pub const PLACEMENT_ORDER: [Category; 5] = [
        Category::Sand,
        Category::Rock,
        Category::Tree,
        Category::Bush,
        Category::Grass,
    ];

    /// Fixed constants for this category.
    pub const fn profile(self) -> &'static CategoryProfile {
        match self {
            Category::Tree => &TREE,
            Category::Bush => &BUSH,
            Category::Grass => &GRASS,
            Category::Rock => &ROCK,
            Category::Sand => &SAND,
        }
    }

    pub const fn min_distance(self) -> f64 {
        self.profile().min_distance
    }

    /// Midpoint of the scale range, used for fallback placements.
    pub fn mid_scale(self) -> f64 {
        let (lo, hi) = self.profile().scale_range;
        (lo + hi) / 2.0
    }

    /// Lowercase name, as used in model paths and density maps.
    pub const fn name(self) -> &'static str {
        match self {
            Category::Tree => "tree",
            Category::Bush => "bush",
            Category::Grass => "grass",
            Category::Rock => "rock",
            Category::Sand => "sand",
        }
    }

    /// Dense index in `0..5`, matching [`Category::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Category::Tree => 0,
            Category::Bush => 1,
            Category::Grass => 2,
            Category::Rock => 3,
            Category::Sand => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
        assert!("shrub".parse::<Category>().is_err());
        assert!("Tree".parse::<Category>().is_err(), "names are lowercase only");
    }

    #[test]
    fn test_placement_order_covers_every_category() {
        let mut order = Category::PLACEMENT_ORDER.to_vec();
        order.sort();
        let mut all = Category::ALL.to_vec();
        all.sort();
        assert_eq!(order, all);
        assert_eq!(Category::PLACEMENT_ORDER[0], Category::Sand);
    }

    #[test]
    fn test_profiles_are_well_formed() {
        for category in Category::ALL {
            let p = category.profile();
            assert!(p.scale_range.0 <= p.scale_range.1, "{category} scale range inverted");
            assert!(p.height_jitter.0 <= p.height_jitter.1, "{category} jitter inverted");
            assert!((0.0..=1.0).contains(&p.edge_weight));
            assert!(p.min_distance > 0.0);
        }
    }

    #[test]
    fn test_spacing_constants() {
        assert_eq!(Category::Tree.min_distance(), 3.0);
        assert_eq!(Category::Rock.min_distance(), 4.0);
        assert_eq!(Category::Sand.min_distance(), 3.0);
        assert_eq!(Category::Bush.min_distance(), 2.0);
        assert_eq!(Category::Grass.min_distance(), 0.5);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, category) in Category::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Rock).unwrap();
        assert_eq!(json, "\"rock\"");
        let parsed: Category = serde_json::from_str("\"sand\"").unwrap();
        assert_eq!(parsed, Category::Sand);
    }
}
