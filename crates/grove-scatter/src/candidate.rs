//! Candidate position generation.
//!
//! Each call proposes at most one `(x, y)` for a category. Proposals are not
//! validated here; the assembler checks them against the placement area and
//! the spacing rules.

use std::f64::consts::TAU;

use grove_terrain::PlanarBounds;
use rand::Rng;

use crate::seed::{det_cos, det_sin};
use crate::{Category, Ledger};

/// Inset applied to the terrain bounds, and again for interior sampling.
pub const MARGIN: f64 = 2.0;
/// Width of the band along the area boundary that counts as the edge zone.
///
/// Describes the zone for callers classifying positions with
/// [`PlacementArea::is_edge`]; edge candidates are snapped to the inset lines
/// and never read this value.
pub const EDGE_WIDTH: f64 = 5.0;
/// Chance a tree grows next to an existing tree.
pub const TREE_CLUSTER_PROBABILITY: f64 = 0.7;
/// Chance a bush grows under an existing tree.
pub const BUSH_CLUSTER_PROBABILITY: f64 = 0.6;
/// Ring radius range for bushes around trees.
pub const BUSH_RING_RADIUS: (f64, f64) = (2.0, 4.0);
/// Interior draws a tree gets to find ground clear of sand.
pub const TREE_INTERIOR_ATTEMPTS: u32 = 10;
/// Perpendicular jitter for sand snapped to an edge.
const SAND_EDGE_JITTER: f64 = 1.0;

/// Uniform draw in `[lo, hi)`. An inverted range samples `(hi, lo]`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.random::<f64>()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..4) {
            0 => Edge::Top,
            1 => Edge::Bottom,
            2 => Edge::Left,
            _ => Edge::Right,
        }
    }
}

/// The region placements must land in: terrain bounds inset by [`MARGIN`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementArea {
    bounds: PlanarBounds,
    terrain: PlanarBounds,
}

impl PlacementArea {
    pub fn from_terrain(terrain: PlanarBounds) -> Self {
        Self {
            bounds: terrain.shrink(MARGIN),
            terrain,
        }
    }

    pub fn bounds(&self) -> PlanarBounds {
        self.bounds
    }

    /// True if `(x, y)` lies strictly inside the area.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains_strict(x, y)
    }

    /// True if `(x, y)` falls within [`EDGE_WIDTH`] of the area boundary.
    ///
    /// Classification only; candidate generation does not consult it.
    pub fn is_edge(&self, x: f64, y: f64) -> bool {
        let b = &self.bounds;
        x < b.min_x + EDGE_WIDTH
            || x > b.max_x - EDGE_WIDTH
            || y < b.min_y + EDGE_WIDTH
            || y > b.max_y - EDGE_WIDTH
    }

    /// Uniform position in the area inset once more by [`MARGIN`].
    pub fn uniform_interior<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let x = uniform(rng, self.bounds.min_x + MARGIN, self.bounds.max_x - MARGIN);
        let y = uniform(rng, self.bounds.min_y + MARGIN, self.bounds.max_y - MARGIN);
        (x, y)
    }

    /// Position for an instance whose search ran out of attempts.
    ///
    /// Samples like [`uniform_interior`](Self::uniform_interior) when the
    /// doubly inset range is non-empty. Narrower axes fall back to the area's
    /// own range, then to the terrain midpoint, and the result is always
    /// clamped into the terrain bounds.
    pub fn fallback_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let (a, t) = (&self.bounds, &self.terrain);
        let x = fallback_axis(rng, (a.min_x, a.max_x), (t.min_x, t.max_x));
        let y = fallback_axis(rng, (a.min_y, a.max_y), (t.min_y, t.max_y));
        (x, y)
    }

    /// Position on one of the four inset lines, chosen uniformly, with
    /// optional jitter perpendicular to that line.
    fn on_edge<R: Rng + ?Sized>(&self, rng: &mut R, jitter: f64) -> (f64, f64) {
        let b = &self.bounds;
        match Edge::random(rng) {
            edge @ (Edge::Top | Edge::Bottom) => {
                let x = uniform(rng, b.min_x + MARGIN, b.max_x - MARGIN);
                let mut y = if edge == Edge::Top {
                    b.max_y - MARGIN
                } else {
                    b.min_y + MARGIN
                };
                if jitter > 0.0 {
                    y += uniform(rng, -jitter, jitter);
                }
                (x, y)
            }
            edge @ (Edge::Left | Edge::Right) => {
                let mut x = if edge == Edge::Right {
                    b.max_x - MARGIN
                } else {
                    b.min_x + MARGIN
                };
                if jitter > 0.0 {
                    x += uniform(rng, -jitter, jitter);
                }
                let y = uniform(rng, b.min_y + MARGIN, b.max_y - MARGIN);
                (x, y)
            }
        }
    }
}

fn fallback_axis<R: Rng + ?Sized>(rng: &mut R, area: (f64, f64), terrain: (f64, f64)) -> f64 {
    let (lo, hi) = area;
    let v = if lo + MARGIN < hi - MARGIN {
        uniform(rng, lo + MARGIN, hi - MARGIN)
    } else if lo < hi {
        uniform(rng, lo, hi)
    } else {
        (terrain.0 + terrain.1) * 0.5
    };
    v.clamp(terrain.0, terrain.1)
}

/// Propose one candidate for `category`.
///
/// Returns `None` only for trees whose interior search found no ground clear
/// of sand; the caller counts that as a spent attempt.
pub fn propose<R: Rng + ?Sized>(
    category: Category,
    area: &PlacementArea,
    ledger: &Ledger,
    rng: &mut R,
) -> Option<(f64, f64)> {
    let edge = rng.random::<f64>() < category.profile().edge_weight;

    match category {
        Category::Sand if edge => Some(area.on_edge(rng, SAND_EDGE_JITTER)),
        Category::Rock if edge => Some(area.on_edge(rng, 0.0)),
        Category::Sand | Category::Rock | Category::Grass => Some(area.uniform_interior(rng)),
        Category::Tree => propose_tree(area, ledger, rng),
        Category::Bush => {
            let trees = ledger.all_of(Category::Tree);
            if !trees.is_empty() && rng.random::<f64>() < BUSH_CLUSTER_PROBABILITY {
                let (cx, cy) = random_anchor(ledger, rng);
                Some(ring_point(cx, cy, BUSH_RING_RADIUS, rng))
            } else {
                Some(area.uniform_interior(rng))
            }
        }
    }
}

fn propose_tree<R: Rng + ?Sized>(
    area: &PlacementArea,
    ledger: &Ledger,
    rng: &mut R,
) -> Option<(f64, f64)> {
    let trees = ledger.all_of(Category::Tree);
    if !trees.is_empty() && rng.random::<f64>() < TREE_CLUSTER_PROBABILITY {
        let (cx, cy) = random_anchor(ledger, rng);
        let spacing = Category::Tree.min_distance();
        return Some(ring_point(cx, cy, (spacing, spacing * 2.0), rng));
    }

    let sand = ledger.all_of(Category::Sand);
    let clearance = Category::Sand.min_distance() * 2.0;
    for _ in 0..TREE_INTERIOR_ATTEMPTS {
        let (x, y) = area.uniform_interior(rng);
        if sand.iter().all(|s| s.planar_distance(x, y) > clearance) {
            return Some((x, y));
        }
    }
    None
}

/// Planar position of a uniformly chosen existing tree.
fn random_anchor<R: Rng + ?Sized>(ledger: &Ledger, rng: &mut R) -> (f64, f64) {
    let trees = ledger.all_of(Category::Tree);
    let anchor = trees[rng.random_range(0..trees.len())].position;
    (anchor.x, anchor.y)
}

fn ring_point<R: Rng + ?Sized>(cx: f64, cy: f64, radius: (f64, f64), rng: &mut R) -> (f64, f64) {
    let r = uniform(rng, radius.0, radius.1);
    let angle = uniform(rng, 0.0, TAU);
    (cx + r * det_cos(angle), cy + r * det_sin(angle))
}
