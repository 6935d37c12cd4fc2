//! Simulator world output: SDF document rendering and placement statistics.

mod error;
mod sdf;
mod stats;

pub use error::WorldError;
pub use sdf::{WORLD_FILE_EXTENSION, WorldWriter};
pub use stats::SceneStatistics;
