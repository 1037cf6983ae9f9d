//! Round-trip verification of emitted index streams.
//!
//! The verifier is a correctness oracle: it reconstructs the triangle set an
//! emitted [`MeshSet`] represents and checks it is exactly the input set,
//! ignoring triangle order and allowing cyclic rotation of each triangle's
//! vertices (winding must be preserved; a reflected triangle never
//! matches). It is a pure function of its inputs, so running it twice gives
//! the same verdict.

use std::collections::HashMap;

use crate::error::{Result, StripError};
use crate::mesh::{strip_triangles, MeshSet, PrimitiveType, Triangle};

/// Check that `meshes` encodes exactly the triangles of `triangles`.
///
/// Every decoded triangle must match an unconsumed input triangle of the
/// mesh's material, and every non-degenerate input triangle must be
/// consumed. Degenerate input triangles are exempt: they are silently
/// dropped during strip generation and never appear in the output.
///
/// # Errors
///
/// [`StripError::UnmatchedOutputTriangle`] if a stream contains a triangle
/// that is not in the input (or appears more often than in the input);
/// [`StripError::MissingInputTriangles`] if input triangles are left over.
/// Both indicate a bug in the strip builder, not a problem with the input.
pub fn verify_meshes(triangles: &[Triangle], meshes: &MeshSet) -> Result<()> {
    // Multiset of unconsumed input triangles, keyed by material and
    // rotation-canonical vertex triple.
    let mut remaining: HashMap<(u16, [u16; 3]), usize> = HashMap::new();
    for t in triangles {
        if t.is_degenerate() {
            continue;
        }
        *remaining.entry((t.material, canonical(t.v))).or_insert(0) += 1;
    }

    for mesh in &meshes.meshes {
        for v in decode(meshes.primitive, &mesh.indices) {
            match remaining.get_mut(&(mesh.material, canonical(v))) {
                Some(n) if *n > 0 => *n -= 1,
                _ => {
                    return Err(StripError::UnmatchedOutputTriangle {
                        material: mesh.material,
                        v0: v[0],
                        v1: v[1],
                        v2: v[2],
                    })
                }
            }
        }
    }

    // Report leftovers for the lowest affected material id.
    let mut leftover: HashMap<u16, usize> = HashMap::new();
    for ((material, _), n) in remaining {
        if n > 0 {
            *leftover.entry(material).or_insert(0) += n;
        }
    }
    if let Some((&material, &count)) = leftover.iter().min_by_key(|&(&m, _)| m) {
        return Err(StripError::MissingInputTriangles { material, count });
    }
    Ok(())
}

/// Decode an index stream into non-degenerate triangles, winding preserved.
fn decode(primitive: PrimitiveType, indices: &[u16]) -> Vec<[u16; 3]> {
    match primitive {
        PrimitiveType::TriangleStrip => strip_triangles(indices).collect(),
        PrimitiveType::TriangleList => indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .filter(|v| v[0] != v[1] && v[1] != v[2] && v[0] != v[2])
            .collect(),
    }
}

/// The lexicographically smallest cyclic rotation of a vertex triple.
///
/// Rotation preserves winding, so two triangles canonicalize equal exactly
/// when they are the same oriented triangle. A reflection changes the
/// orientation and therefore the canonical form.
fn canonical(v: [u16; 3]) -> [u16; 3] {
    let rotations = [v, [v[1], v[2], v[0]], [v[2], v[0], v[1]]];
    rotations.into_iter().min().unwrap_or(v)
}
