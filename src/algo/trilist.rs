//! Plain triangle-list mesh building.
//!
//! The trivial alternative to strip generation: indices are copied out
//! three at a time, grouped per material. Useful as a baseline and for
//! hardware paths where strips are not wanted.

use crate::error::Result;
use crate::mesh::{validate_triangles, Mesh, MeshSet, PrimitiveType, Triangle};

/// Build one triangle-list mesh per material.
///
/// Triangles keep their input order within each material and their exact
/// vertex order; degenerate triangles are dropped, matching the strip
/// path. The result contains exactly `num_materials` meshes.
///
/// # Errors
///
/// The same input validation as
/// [`build_tristrips`](crate::algo::stripify::build_tristrips); no output
/// is produced on failure.
pub fn build_trilist(
    triangles: &[Triangle],
    num_vertices: usize,
    num_materials: u16,
) -> Result<MeshSet> {
    validate_triangles(triangles, num_vertices, num_materials)?;

    let mut meshes: Vec<Mesh> = (0..num_materials)
        .map(|material| Mesh {
            material,
            indices: Vec::new(),
        })
        .collect();
    for t in triangles {
        if t.is_degenerate() {
            continue;
        }
        meshes[t.material as usize].indices.extend_from_slice(&t.v);
    }

    Ok(MeshSet {
        primitive: PrimitiveType::TriangleList,
        meshes,
    })
}
