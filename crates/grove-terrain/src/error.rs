//! Terrain error types.

/// Errors raised while loading or indexing a terrain mesh.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// The mesh contains no triangles, so no surface can be sampled.
    #[error("terrain mesh is empty or missing")]
    Unavailable,

    /// Failed to read the mesh file from disk.
    #[error("failed to read terrain mesh: {0}")]
    Io(#[from] std::io::Error),

    /// The mesh file is not a valid binary or ASCII STL document.
    #[error("malformed STL data: {0}")]
    Malformed(String),
}
