//! Density source selection for a run.

use std::path::Path;

use grove_config::{CliArgs, Config};
use grove_scatter::DensityConfig;

/// Pick the density for a run.
///
/// Precedence: `--config-file`, then `--density`, then the config's
/// `generation.density` map, then the built-in default. Any invalid source
/// falls back to the default with a warning; it never aborts the run.
pub fn resolve_density(args: &CliArgs, config: &Config) -> DensityConfig {
    if let Some(ref path) = args.config_file {
        return from_file(path);
    }
    if let Some(ref json) = args.density {
        return DensityConfig::from_json_or_default(json);
    }
    if !config.generation.density.is_empty() {
        return DensityConfig::from_entries_or_default(
            config
                .generation
                .density
                .iter()
                .map(|(name, count)| (name.as_str(), *count)),
        );
    }
    DensityConfig::default()
}

fn from_file(path: &Path) -> DensityConfig {
    match std::fs::read_to_string(path) {
        Ok(json) => DensityConfig::from_json_or_default(&json),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read density file, using default");
            DensityConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use grove_scatter::Category;

    use super::*;

    #[test]
    fn test_no_source_gives_default() {
        let density = resolve_density(&CliArgs::default(), &Config::default());
        assert_eq!(density, DensityConfig::default());
    }

    #[test]
    fn test_density_flag() {
        let args = CliArgs {
            density: Some(r#"{"tree": 10, "rock": 5}"#.to_string()),
            ..CliArgs::default()
        };
        let density = resolve_density(&args, &Config::default());
        assert_eq!(density.count(Category::Tree), 10);
        assert_eq!(density.count(Category::Rock), 5);
        assert_eq!(density.count(Category::Grass), 0);
    }

    #[test]
    fn test_config_file_beats_density_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("density.json");
        std::fs::write(&path, r#"{"bush": 7}"#).unwrap();
        let args = CliArgs {
            config_file: Some(path),
            density: Some(r#"{"tree": 1}"#.to_string()),
            ..CliArgs::default()
        };
        let density = resolve_density(&args, &Config::default());
        assert_eq!(density.count(Category::Bush), 7);
        assert_eq!(density.count(Category::Tree), 0);
    }

    #[test]
    fn test_unreadable_file_gives_default() {
        let args = CliArgs {
            config_file: Some(PathBuf::from("/nonexistent/density.json")),
            ..CliArgs::default()
        };
        assert_eq!(resolve_density(&args, &Config::default()), DensityConfig::default());
    }

    #[test]
    fn test_config_map_used_when_no_flags() {
        let mut config = Config::default();
        config.generation.density.insert("grass".to_string(), 40);
        let density = resolve_density(&CliArgs::default(), &config);
        assert_eq!(density.count(Category::Grass), 40);
        assert_eq!(density.total(), 40);
    }

    #[test]
    fn test_invalid_config_map_gives_default() {
        let mut config = Config::default();
        config.generation.density.insert("cactus".to_string(), 3);
        let density = resolve_density(&CliArgs::default(), &config);
        assert_eq!(density, DensityConfig::default());
    }
}
