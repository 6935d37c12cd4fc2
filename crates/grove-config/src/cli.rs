//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Grove command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "grove", about = "Populate a terrain mesh with scenery for Gazebo")]
pub struct CliArgs {
    /// Project root containing `models/` and `worlds/`.
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// JSON object of per-category counts, e.g. '{"tree":10,"rock":5}'.
    #[arg(long)]
    pub density: Option<String>,

    /// JSON file holding a density object. Takes precedence over `--density`.
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    /// RNG seed for a reproducible world.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name of the generated world.
    #[arg(long)]
    pub world_name: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Density flags are not folded in here; they are parsed as JSON by the
    /// caller, which also owns the fallback to the default density.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref base) = args.base_path {
            self.paths.base_path = base.clone();
        }
        if let Some(ref name) = args.world_name {
            self.paths.world_name = name.clone();
        }
        if let Some(seed) = args.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
