//! The `grove` application: turns a project tree into a populated world file.

mod density;
mod error;
pub mod platform;
mod project;

use std::path::PathBuf;

use grove_config::{CliArgs, Config};
use grove_scatter::{VariantRegistry, populate_world, resolve_seed};
use grove_world::{SceneStatistics, WorldWriter};

pub use density::resolve_density;
pub use error::AppError;
pub use project::ProjectLayout;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub world_path: PathBuf,
    pub seed: u64,
    pub statistics: SceneStatistics,
}

/// Verify the project, populate the terrain, and write the world file.
///
/// `config` must already carry CLI overrides; `args` is consulted only for
/// the density sources.
///
/// # Errors
///
/// Returns [`AppError`] when paths are missing, the terrain cannot be loaded,
/// the model tree cannot be read, or the world file cannot be written.
pub fn run(config: &Config, args: &CliArgs) -> Result<RunReport, AppError> {
    let layout = ProjectLayout::new(&config.paths.base_path);
    layout.verify()?;

    let models_dir = layout.models_dir();
    let registry = VariantRegistry::discover(&models_dir).map_err(|source| AppError::Models {
        path: models_dir.clone(),
        source,
    })?;
    let mesh = grove_terrain::load_stl(&layout.terrain_mesh())?;

    let density = resolve_density(args, config);
    tracing::info!(total = density.total(), "Density resolved");
    let seed = resolve_seed(config.generation.seed);

    let scene = populate_world(mesh, &registry, &density, seed)?;
    let statistics = SceneStatistics::from_scene(&scene);
    statistics.log();

    let writer = WorldWriter::new(config.paths.world_name.as_str());
    let world_path = writer.write(&scene, &layout.worlds_dir())?;

    Ok(RunReport {
        world_path,
        seed,
        statistics,
    })
}
