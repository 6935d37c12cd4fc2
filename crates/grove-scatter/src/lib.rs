//! Biome-aware scenery placement over a terrain mesh.
//!
//! Places trees, bushes, grass, rocks, and sand patches with per-category
//! spacing, edge/center zone bias, and tree-anchored clustering. Every
//! instance gets a bounded stochastic search followed by a fallback position,
//! so a run always terminates.

mod assembler;
pub mod candidate;
mod category;
mod density;
mod error;
mod ledger;
mod registry;
pub mod rules;
pub mod seed;

pub use assembler::{MAX_ATTEMPTS, Rotation, Scene, SceneAssembler, SceneEntry, populate_world};
pub use candidate::{MARGIN, PlacementArea};
pub use category::{Category, CategoryProfile, UnknownCategory};
pub use density::{DensityConfig, DensityError};
pub use error::ScatterError;
pub use ledger::{Ledger, PlacementRecord};
pub use registry::VariantRegistry;
pub use seed::{ScatterRng, resolve_seed, scatter_rng};
