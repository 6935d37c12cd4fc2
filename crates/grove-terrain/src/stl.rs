//! STL terrain loading (binary and ASCII).

use std::path::Path;

use glam::DVec3;

use crate::{TerrainError, TerrainMesh, Triangle};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Load a terrain mesh from an STL file.
///
/// # Errors
///
/// Returns [`TerrainError::Io`] if the file cannot be read, and
/// [`TerrainError::Malformed`] or [`TerrainError::Unavailable`] from [`parse_stl`].
pub fn load_stl(path: &Path) -> Result<TerrainMesh, TerrainError> {
    let bytes = std::fs::read(path)?;
    let mesh = parse_stl(&bytes)?;
    tracing::info!(path = %path.display(), triangles = mesh.len(), "Loaded terrain mesh");
    Ok(mesh)
}

/// Parse STL bytes. Binary layout is tried first; a size mismatch falls back
/// to ASCII when the data starts with `solid`.
///
/// # Errors
///
/// Returns [`TerrainError::Malformed`] if the data is neither valid binary nor
/// ASCII STL, and [`TerrainError::Unavailable`] if it holds zero triangles.
pub fn parse_stl(bytes: &[u8]) -> Result<TerrainMesh, TerrainError> {
    if let Some(triangles) = parse_binary(bytes) {
        return TerrainMesh::new(triangles);
    }
    if bytes.trim_ascii_start().starts_with(b"solid") {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| TerrainError::Malformed(format!("ASCII STL is not UTF-8: {e}")))?;
        return TerrainMesh::new(parse_ascii(text)?);
    }
    Err(TerrainError::Malformed(format!(
        "{} bytes match neither binary nor ASCII STL",
        bytes.len()
    )))
}

fn parse_binary(bytes: &[u8]) -> Option<Vec<Triangle>> {
    let count_bytes: [u8; 4] = bytes.get(HEADER_LEN..HEADER_LEN + 4)?.try_into().ok()?;
    let count = u32::from_le_bytes(count_bytes) as usize;
    let body = &bytes[HEADER_LEN + 4..];
    if body.len() != count.checked_mul(FACET_LEN)? {
        return None;
    }

    let triangles = body
        .chunks_exact(FACET_LEN)
        .map(|facet| {
            // Skip the 12-byte normal; the trailing u16 attribute is ignored.
            let vertex = |i: usize| {
                let base = 12 + i * 12;
                DVec3::new(
                    read_f32(facet, base) as f64,
                    read_f32(facet, base + 4) as f64,
                    read_f32(facet, base + 8) as f64,
                )
            };
            Triangle::new(vertex(0), vertex(1), vertex(2))
        })
        .collect();
    Some(triangles)
}

fn read_f32(buf: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

fn parse_ascii(text: &str) -> Result<Vec<Triangle>, TerrainError> {
    let mut vertices = Vec::new();
    let mut tokens = text.split_ascii_whitespace();
    while let Some(token) = tokens.next() {
        if token != "vertex" {
            continue;
        }
        let mut coords = [0.0f64; 3];
        for c in &mut coords {
            let raw = tokens
                .next()
                .ok_or_else(|| TerrainError::Malformed("truncated vertex".into()))?;
            *c = raw
                .parse()
                .map_err(|_| TerrainError::Malformed(format!("bad coordinate `{raw}`")))?;
        }
        vertices.push(DVec3::from_array(coords));
    }

    if vertices.len() % 3 != 0 {
        return Err(TerrainError::Malformed(format!(
            "{} vertices do not form whole triangles",
            vertices.len()
        )));
    }
    Ok(vertices
        .chunks_exact(3)
        .map(|v| Triangle::new(v[0], v[1], v[2]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_LEN];
        out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
        for tri in triangles {
            out.extend_from_slice(&[0u8; 12]);
            for v in tri {
                for c in v {
                    out.extend_from_slice(&c.to_le_bytes());
                }
            }
            out.extend_from_slice(&[0u8; 2]);
        }
        out
    }

    #[test]
    fn test_parse_binary_stl() {
        let bytes = binary_stl(&[
            [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]],
            [[1.0, 1.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, 2.0]],
        ]);
        let mesh = parse_stl(&bytes).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles()[1].vertices[0], DVec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_parse_ascii_stl() {
        let text = "solid terrain\n\
            facet normal 0 0 1\n outer loop\n\
            vertex 0 0 0\n vertex 2 0 0\n vertex 0 2 0.5\n\
            endloop\n endfacet\n\
            endsolid terrain\n";
        let mesh = parse_stl(text.as_bytes()).unwrap();
        assert_eq!(mesh.len(), 1);
        assert!((mesh.triangles()[0].mean_z() - 0.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_triangles_is_unavailable() {
        let bytes = binary_stl(&[]);
        assert!(matches!(parse_stl(&bytes), Err(TerrainError::Unavailable)));
    }

    #[test]
    fn test_truncated_binary_is_malformed() {
        let mut bytes = binary_stl(&[[[0.0; 3]; 3]]);
        bytes.truncate(bytes.len() - 10);
        assert!(matches!(parse_stl(&bytes), Err(TerrainError::Malformed(_))));
    }

    #[test]
    fn test_ascii_partial_triangle_is_malformed() {
        let text = "solid t\n vertex 0 0 0\n vertex 1 0 0\nendsolid t\n";
        assert!(matches!(
            parse_stl(text.as_bytes()),
            Err(TerrainError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_stl(&dir.path().join("terrain.stl"));
        assert!(matches!(result, Err(TerrainError::Io(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.stl");
        std::fs::write(&path, binary_stl(&[[[0.0, 0.0, 0.0], [5.0, 0.0, 0.0], [0.0, 5.0, 0.0]]]))
            .unwrap();
        let mesh = load_stl(&path).unwrap();
        assert_eq!(mesh.planar_bounds().max_x, 5.0);
    }
}
