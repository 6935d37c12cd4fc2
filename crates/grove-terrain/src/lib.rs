//! Terrain surface model: triangle mesh, planar bounds, height lookup, and STL loading.

mod error;
mod mesh;
mod stl;
mod surface;

pub use error::TerrainError;
pub use mesh::{PlanarBounds, TerrainMesh, Triangle};
pub use stl::{load_stl, parse_stl};
pub use surface::TerrainSurface;
