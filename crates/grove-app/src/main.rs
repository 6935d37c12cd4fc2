//! The binary entry point for the grove world generator.

use clap::Parser;
use grove_app::platform::PlatformDirs;
use grove_app::{AppError, RunReport, run};
use grove_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let report = setup(&args).and_then(|config| run(&config, &args));
    match report {
        Ok(report) => print_instructions(&report),
        Err(e) => {
            tracing::error!(error = %e, "World generation failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Resolve directories, load `config.ron`, apply CLI overrides, start logging.
fn setup(args: &CliArgs) -> Result<Config, AppError> {
    let dirs = match args.config {
        Some(ref dir) => PlatformDirs::with_config_dir(dir.clone()),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);

    grove_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(
        config = %dirs.config_dir.display(),
        base = %config.paths.base_path.display(),
        "Grove starting"
    );
    Ok(config)
}

fn print_instructions(report: &RunReport) {
    let models = report
        .world_path
        .parent()
        .and_then(|worlds| worlds.parent())
        .map(|base| base.join("models"));

    println!("\nForest world created at: {}", report.world_path.display());
    println!("  {} (seed {})", report.statistics, report.seed);
    println!("\nTo view in Gazebo:");
    if let Some(models) = models {
        println!("export GAZEBO_MODEL_PATH={}", models.display());
    }
    println!("gazebo {}", report.world_path.display());
}
