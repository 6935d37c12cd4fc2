//! Application-level error type.

use std::path::PathBuf;

use grove_config::ConfigError;
use grove_scatter::ScatterError;
use grove_terrain::TerrainError;
use grove_world::WorldError;

use crate::platform::PlatformError;

/// Errors that end a `grove` run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The project tree lacks directories the run needs.
    #[error("required paths not found: {}", display_paths(.0))]
    MissingPaths(Vec<PathBuf>),

    /// A model directory exists but could not be listed.
    #[error("failed to scan models in {path}: {source}")]
    Models {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),

    #[error(transparent)]
    Scatter(#[from] ScatterError),

    #[error("world output: {0}")]
    World(#[from] WorldError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
