//! Scene assembly: the per-category placement loop.

use std::f64::consts::TAU;

use glam::DVec3;
use grove_terrain::{TerrainMesh, TerrainSurface};
use rand::Rng;

use crate::candidate::{PlacementArea, propose, uniform};
use crate::seed::scatter_rng;
use crate::{
    Category, DensityConfig, Ledger, PlacementRecord, ScatterError, VariantRegistry, rules,
};

/// Attempts per instance before falling back to an unconstrained position.
pub const MAX_ATTEMPTS: u32 = 50;

/// Roll, pitch, and yaw in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// One instance in the output scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntry {
    pub category: Category,
    pub variant: String,
    /// Index of the requested instance within its category.
    pub index: u32,
    pub position: DVec3,
    pub rotation: Rotation,
    /// Uniform scale factor.
    pub scale: f64,
    /// Placed by the fallback path; spacing rules were not enforced.
    pub fallback: bool,
}

/// Result of a population run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Entries in placement order.
    pub entries: Vec<SceneEntry>,
    /// Ledger size per category, in [`Category::ALL`] order.
    pub counts: Vec<(Category, usize)>,
    /// Number of fallback placements.
    pub fallbacks: usize,
}

impl Scene {
    /// Entries of one category.
    pub fn entries_of(&self, category: Category) -> impl Iterator<Item = &SceneEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    /// Number of placements recorded for `category`.
    pub fn count(&self, category: Category) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |&(_, n)| n)
    }
}

/// Drives placement over a terrain surface using a variant registry.
///
/// The assembler owns the [`Ledger`]; the surface and registry are borrowed
/// read-only for the duration of a run.
pub struct SceneAssembler<'a> {
    surface: &'a TerrainSurface,
    registry: &'a VariantRegistry,
    area: PlacementArea,
    ledger: Ledger,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(surface: &'a TerrainSurface, registry: &'a VariantRegistry) -> Self {
        Self {
            surface,
            registry,
            area: PlacementArea::from_terrain(surface.bounds()),
            ledger: Ledger::new(),
        }
    }

    /// The region accepted placements land in.
    pub fn area(&self) -> &PlacementArea {
        &self.area
    }

    /// Placements from the most recent run.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Place every requested instance and return the resulting scene.
    ///
    /// The ledger is cleared first, so runs never see each other's placements.
    pub fn populate<R: Rng + ?Sized>(&mut self, density: &DensityConfig, rng: &mut R) -> Scene {
        self.ledger.reset();
        let mut entries = Vec::new();

        for category in Category::PLACEMENT_ORDER {
            let count = density.count(category);
            if count == 0 {
                continue;
            }
            if self.registry.variants_for(category).is_empty() {
                tracing::warn!(%category, count, "No variants available, skipping category");
                continue;
            }
            tracing::info!(%category, count, "Placing models");

            for index in 0..count {
                let Some(variant) = self.registry.pick_variant(category, rng) else {
                    continue;
                };
                let variant = variant.to_string();
                entries.push(self.place_one(category, variant, index, rng));
            }
        }

        let scene = Scene {
            entries,
            counts: self.ledger.counts(),
            fallbacks: self.ledger.fallback_count(),
        };
        for &(category, n) in &scene.counts {
            tracing::info!(%category, placed = n, "Placement summary");
        }
        if scene.fallbacks > 0 {
            tracing::warn!(fallbacks = scene.fallbacks, "Some instances used fallback positions");
        }
        scene
    }

    fn place_one<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        variant: String,
        index: u32,
        rng: &mut R,
    ) -> SceneEntry {
        let profile = category.profile();

        if let Some(position) = self.search(category, rng) {
            self.ledger.add(PlacementRecord::accepted(category, position));
            let scale = uniform(rng, profile.scale_range.0, profile.scale_range.1);
            let tilt = if profile.max_tilt > 0.0 {
                uniform(rng, -profile.max_tilt, profile.max_tilt)
            } else {
                0.0
            };
            let yaw = uniform(rng, 0.0, TAU);
            return SceneEntry {
                category,
                variant,
                index,
                position,
                rotation: Rotation {
                    roll: tilt,
                    pitch: tilt,
                    yaw,
                },
                scale,
                fallback: false,
            };
        }

        let (x, y) = self.area.fallback_point(rng);
        let position = DVec3::new(x, y, 0.0);
        tracing::debug!(%category, index, x, y, "Attempt budget exhausted, using fallback");
        self.ledger.add(PlacementRecord::fallback(category, position));
        SceneEntry {
            category,
            variant,
            index,
            position,
            rotation: Rotation {
                roll: 0.0,
                pitch: 0.0,
                yaw: uniform(rng, 0.0, TAU),
            },
            scale: category.mid_scale(),
            fallback: true,
        }
    }

    /// Bounded search for an acceptable position. Returns the position with
    /// its jittered surface height.
    fn search<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Option<DVec3> {
        for _ in 0..MAX_ATTEMPTS {
            let Some((x, y)) = propose(category, &self.area, &self.ledger, rng) else {
                continue;
            };
            if !self.area.contains(x, y) || !rules::is_acceptable(x, y, category, &self.ledger) {
                continue;
            }
            let (lo, hi) = category.profile().height_jitter;
            let z = self.surface.height_at(x, y) + uniform(rng, lo, hi);
            return Some(DVec3::new(x, y, z));
        }
        None
    }
}

/// Index `mesh` and run one seeded population pass.
///
/// # Errors
///
/// Returns [`ScatterError::Terrain`] if the mesh cannot be indexed.
pub fn populate_world(
    mesh: TerrainMesh,
    registry: &VariantRegistry,
    density: &DensityConfig,
    seed: u64,
) -> Result<Scene, ScatterError> {
    let surface = TerrainSurface::new(mesh)?;
    let mut rng = scatter_rng(seed);
    let mut assembler = SceneAssembler::new(&surface, registry);
    Ok(assembler.populate(density, &mut rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_surface(size: f64, z: f64) -> TerrainSurface {
        TerrainSurface::new(TerrainMesh::flat_rectangle((0.0, 0.0), (size, size), z)).unwrap()
    }

    #[test]
    fn test_single_tree_scene() {
        let surface = flat_surface(10.0, 0.0);
        let registry = VariantRegistry::from_iter([(Category::Tree, "oak")]);
        let density = DensityConfig::from_counts([
            (Category::Tree, 1),
            (Category::Sand, 0),
            (Category::Rock, 0),
            (Category::Bush, 0),
            (Category::Grass, 0),
        ]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        let scene = assembler.populate(&density, &mut scatter_rng(42));

        assert_eq!(scene.entries.len(), 1);
        let entry = &scene.entries[0];
        assert_eq!(entry.category, Category::Tree);
        assert_eq!(entry.variant, "oak");
        assert_eq!(entry.index, 0);
        assert!((0.0..=10.0).contains(&entry.position.x));
        assert!((0.0..=10.0).contains(&entry.position.y));
        assert!((0.8..=1.5).contains(&entry.scale));
        assert!(!entry.fallback, "the first tree on empty ground is always accepted");
    }

    #[test]
    fn test_accepted_height_follows_surface_with_jitter() {
        let surface = flat_surface(40.0, 5.0);
        let registry = VariantRegistry::from_iter([(Category::Sand, "dune")]);
        let density = DensityConfig::from_counts([(Category::Sand, 8)]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        let scene = assembler.populate(&density, &mut scatter_rng(3));

        for entry in scene.entries_of(Category::Sand).filter(|e| !e.fallback) {
            let dz = entry.position.z - 5.0;
            assert!((-0.2 - 1e-9..=1e-9).contains(&dz), "sand jitter out of band: {dz}");
            assert_eq!(entry.rotation.roll, 0.0);
            assert_eq!(entry.rotation.pitch, 0.0);
            assert!((0.0..=TAU).contains(&entry.rotation.yaw));
        }
    }

    #[test]
    fn test_rock_tilt_band() {
        let surface = flat_surface(60.0, 0.0);
        let registry = VariantRegistry::from_iter([(Category::Rock, "boulder")]);
        let density = DensityConfig::from_counts([(Category::Rock, 6)]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        let scene = assembler.populate(&density, &mut scatter_rng(17));

        for entry in scene.entries_of(Category::Rock).filter(|e| !e.fallback) {
            assert_eq!(entry.rotation.roll, entry.rotation.pitch);
            assert!(entry.rotation.roll.abs() <= 0.15 + 1e-12);
        }
    }

    #[test]
    fn test_missing_variants_skip_category() {
        let surface = flat_surface(50.0, 0.0);
        let registry = VariantRegistry::from_iter([(Category::Tree, "oak")]);
        let density = DensityConfig::from_counts([(Category::Rock, 5), (Category::Tree, 2)]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        let scene = assembler.populate(&density, &mut scatter_rng(1));

        assert_eq!(scene.entries_of(Category::Rock).count(), 0);
        assert_eq!(scene.count(Category::Rock), 0);
        assert_eq!(scene.entries_of(Category::Tree).count(), 2);
    }

    #[test]
    fn test_fallback_is_recorded_in_ledger() {
        // A 10x10 terrain leaves a 2x2 sampling window: four rocks 4 units
        // apart cannot all fit, so later rocks fall back.
        let surface = flat_surface(10.0, 3.0);
        let registry = VariantRegistry::from_iter([(Category::Rock, "boulder")]);
        let density = DensityConfig::from_counts([(Category::Rock, 4)]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        let scene = assembler.populate(&density, &mut scatter_rng(5));

        assert_eq!(scene.entries.len(), 4);
        assert!(scene.fallbacks > 0);
        assert_eq!(assembler.ledger().len_of(Category::Rock), 4);
        for entry in scene.entries.iter().filter(|e| e.fallback) {
            assert_eq!(entry.position.z, 0.0);
            assert_eq!(entry.rotation.roll, 0.0);
            assert_eq!(entry.scale, Category::Rock.mid_scale());
            assert!(assembler.area().contains(entry.position.x, entry.position.y));
        }
    }

    #[test]
    fn test_ledger_resets_between_runs() {
        let surface = flat_surface(30.0, 0.0);
        let registry = VariantRegistry::from_iter([(Category::Bush, "agave")]);
        let density = DensityConfig::from_counts([(Category::Bush, 3)]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        assembler.populate(&density, &mut scatter_rng(1));
        let second = assembler.populate(&density, &mut scatter_rng(2));
        assert_eq!(second.count(Category::Bush), 3);
        assert_eq!(assembler.ledger().len(), 3);
    }

    #[test]
    fn test_categories_follow_placement_order() {
        let surface = flat_surface(80.0, 0.0);
        let registry = VariantRegistry::from_iter([
            (Category::Grass, "cynodon"),
            (Category::Tree, "oak"),
            (Category::Sand, "dune"),
        ]);
        let density = DensityConfig::from_counts([
            (Category::Grass, 3),
            (Category::Tree, 2),
            (Category::Sand, 1),
        ]);
        let mut assembler = SceneAssembler::new(&surface, &registry);
        let scene = assembler.populate(&density, &mut scatter_rng(8));
        let order: Vec<Category> = scene.entries.iter().map(|e| e.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Sand,
                Category::Tree,
                Category::Tree,
                Category::Grass,
                Category::Grass,
                Category::Grass,
            ]
        );
    }

    #[test]
    fn test_populate_world_is_seed_reproducible() {
        let registry =
            VariantRegistry::from_iter([(Category::Tree, "oak"), (Category::Grass, "rye")]);
        let density = DensityConfig::from_counts([(Category::Tree, 5), (Category::Grass, 20)]);
        let mesh = TerrainMesh::flat_rectangle((0.0, 0.0), (50.0, 50.0), 1.0);
        let a = populate_world(mesh.clone(), &registry, &density, 99).unwrap();
        let b = populate_world(mesh, &registry, &density, 99).unwrap();
        assert_eq!(a, b);
    }
}
