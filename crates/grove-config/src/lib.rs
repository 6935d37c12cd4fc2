//! Configuration for the grove world generator.
//!
//! Settings persist to disk as `config.ron`. Command-line flags override the
//! loaded values, and unknown or missing fields fall back to defaults so old
//! files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, GenerationConfig, PathsConfig};
pub use error::ConfigError;
