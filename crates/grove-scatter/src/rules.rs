//! Minimum-distance constraints between placements.
//!
//! Every category keeps its own spacing from itself. On top of that a small
//! asymmetric exclusion table keeps trees off rocky and sandy ground and
//! bushes off sand. An exclusion is measured with the *other* category's
//! spacing constant.

use crate::{Category, Ledger};

/// Categories whose placements `category` must additionally keep clear of.
pub const fn exclusions(category: Category) -> &'static [Category] {
    match category {
        Category::Tree => &[Category::Rock, Category::Sand],
        Category::Bush => &[Category::Sand],
        Category::Grass | Category::Rock | Category::Sand => &[],
    }
}

/// True if a `category` instance at `(x, y)` respects every spacing rule
/// against the placements already in `ledger`.
pub fn is_acceptable(x: f64, y: f64, category: Category, ledger: &Ledger) -> bool {
    clear_of(x, y, category, category.min_distance(), ledger)
        && exclusions(category)
            .iter()
            .all(|&other| clear_of(x, y, other, other.min_distance(), ledger))
}

fn clear_of(x: f64, y: f64, other: Category, min_distance: f64, ledger: &Ledger) -> bool {
    ledger
        .all_of(other)
        .iter()
        .all(|r| r.planar_distance(x, y) >= min_distance)
}
