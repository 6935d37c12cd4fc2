//! Triangle mesh and planar bounds.
//!
//! Coordinates follow the simulator convention: X/Y span the ground plane and
//! Z is vertical.

use glam::DVec3;

use crate::TerrainError;

/// A single terrain triangle. Degenerate triangles are allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [DVec3; 3],
}

impl Triangle {
    /// Create a triangle from three vertices.
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Smallest planar (x, y) distance from the query point to any vertex, squared.
    pub fn nearest_vertex_distance_sq(&self, x: f64, y: f64) -> f64 {
        self.vertices
            .iter()
            .map(|v| (v.x - x).powi(2) + (v.y - y).powi(2))
            .fold(f64::INFINITY, f64::min)
    }

    /// Mean vertical coordinate of the three vertices.
    pub fn mean_z(&self) -> f64 {
        (self.vertices[0].z + self.vertices[1].z + self.vertices[2].z) / 3.0
    }
}

/// Immutable terrain mesh.
///
/// Invariant: holds at least one triangle.
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    triangles: Vec<Triangle>,
}

impl TerrainMesh {
    /// Build a mesh from a list of triangles.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::Unavailable`] if `triangles` is empty.
    pub fn new(triangles: Vec<Triangle>) -> Result<Self, TerrainError> {
        if triangles.is_empty() {
            return Err(TerrainError::Unavailable);
        }
        Ok(Self { triangles })
    }

    /// Two triangles covering the axis-aligned rectangle at a constant height.
    pub fn flat_rectangle(min: (f64, f64), max: (f64, f64), z: f64) -> Self {
        let a = DVec3::new(min.0, min.1, z);
        let b = DVec3::new(max.0, min.1, z);
        let c = DVec3::new(max.0, max.1, z);
        let d = DVec3::new(min.0, max.1, z);
        Self {
            triangles: vec![Triangle::new(a, b, c), Triangle::new(a, c, d)],
        }
    }

    /// All triangles in load order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Always `false` for a constructed mesh.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Planar extent of every vertex in the mesh.
    pub fn planar_bounds(&self) -> PlanarBounds {
        let mut bounds = PlanarBounds {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for v in self.triangles.iter().flat_map(|t| t.vertices.iter()) {
            bounds.min_x = bounds.min_x.min(v.x);
            bounds.max_x = bounds.max_x.max(v.x);
            bounds.min_y = bounds.min_y.min(v.y);
            bounds.max_y = bounds.max_y.max(v.y);
        }
        bounds
    }
}

/// Axis-aligned rectangle on the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl PlanarBounds {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Inset every side by `margin`.
    pub fn shrink(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x + margin,
            max_x: self.max_x - margin,
            min_y: self.min_y + margin,
            max_y: self.max_y - margin,
        }
    }

    /// True if the point lies strictly inside the rectangle.
    pub fn contains_strict(&self, x: f64, y: f64) -> bool {
        x > self.min_x && x < self.max_x && y > self.min_y && y < self.max_y
    }

    /// True if the point lies inside or on the boundary.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
