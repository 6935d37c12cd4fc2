//! Scatter error types.

use grove_terrain::TerrainError;

/// Errors that abort a population run.
///
/// Invalid densities, empty variant sets, and exhausted attempt budgets are
/// recovered in place and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ScatterError {
    /// The terrain mesh could not be indexed.
    #[error("terrain unavailable: {0}")]
    Terrain(#[from] TerrainError),
}
