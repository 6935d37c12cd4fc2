//! Height lookup over a terrain mesh.
//!
//! The lookup picks the triangle owning the vertex nearest to the query point
//! in the ground plane and returns the mean height of that triangle. It is not
//! barycentric interpolation and does not test point-in-triangle containment;
//! existing worlds were generated with this approximation, so it is kept.

use crate::{PlanarBounds, TerrainError, TerrainMesh};

/// Read-only spatial index over a [`TerrainMesh`].
#[derive(Clone, Debug)]
pub struct TerrainSurface {
    mesh: TerrainMesh,
    bounds: PlanarBounds,
}

impl TerrainSurface {
    /// Index a mesh. Bounds are computed once here.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::Unavailable`] if the mesh has no triangles.
    pub fn new(mesh: TerrainMesh) -> Result<Self, TerrainError> {
        if mesh.is_empty() {
            return Err(TerrainError::Unavailable);
        }
        let bounds = mesh.planar_bounds();
        tracing::debug!(
            triangles = mesh.len(),
            min_x = bounds.min_x,
            max_x = bounds.max_x,
            min_y = bounds.min_y,
            max_y = bounds.max_y,
            "Indexed terrain surface"
        );
        Ok(Self { mesh, bounds })
    }

    /// Planar extent of the mesh.
    pub fn bounds(&self) -> PlanarBounds {
        self.bounds
    }

    /// The underlying mesh.
    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Approximate surface height at `(x, y)`.
    ///
    /// Ties between triangles resolve to the one loaded first.
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        let mut best_distance = f64::INFINITY;
        let mut best_z = 0.0;
        for triangle in self.mesh.triangles() {
            let d = triangle.nearest_vertex_distance_sq(x, y);
            if d < best_distance {
                best_distance = d;
                best_z = triangle.mean_z();
            }
        }
        best_z
    }
}
