//! On-disk project layout.
//!
//! ```text
//! <base>/models/<category>/<variant>/
//! <base>/models/ground/mesh/terrain.stl
//! <base>/worlds/
//! ```

use std::path::{Path, PathBuf};

use grove_scatter::Category;

use crate::AppError;

/// Paths derived from the project base directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    base: PathBuf,
}

impl ProjectLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn models_dir(&self) -> PathBuf {
        self.base.join("models")
    }

    pub fn ground_dir(&self) -> PathBuf {
        self.models_dir().join("ground")
    }

    pub fn terrain_mesh(&self) -> PathBuf {
        self.ground_dir().join("mesh").join("terrain.stl")
    }

    pub fn worlds_dir(&self) -> PathBuf {
        self.base.join("worlds")
    }

    /// Check that every category directory and the ground model exist.
    ///
    /// All missing paths are reported together. The worlds directory is
    /// created on write and is not required.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingPaths`] listing what is absent.
    pub fn verify(&self) -> Result<(), AppError> {
        let models = self.models_dir();
        let missing: Vec<PathBuf> = Category::ALL
            .iter()
            .map(|c| models.join(c.name()))
            .chain(std::iter::once(self.ground_dir()))
            .filter(|p| !p.is_dir())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            for path in &missing {
                tracing::error!(path = %path.display(), "Required path not found");
            }
            Err(AppError::MissingPaths(missing))
        }
    }
}
