//! Mesh data types shared by the strip generation algorithms.
//!
//! The input to this library is a flat list of [`Triangle`]s indexing into a
//! shared vertex buffer, each tagged with a material id. The output is a
//! [`MeshSet`]: one [`Mesh`] per material holding a single index stream in
//! either plain triangle-list order or the stitched triangle-strip
//! convention.
//!
//! # The stitched strip convention
//!
//! A triangle strip encodes N triangles as N + 2 indices: each new index
//! forms a triangle with the previous two, with winding alternating from
//! triangle to triangle. Independent strips are joined into one stream by
//! duplicating indices at the seam; any index triple containing a repeated
//! index is a *degenerate* triangle and must be skipped by the consumer.
//! [`strip_triangles`] implements exactly that decoding.

use crate::error::{Result, StripError};

/// A single input triangle: three vertex indices plus a material id.
///
/// Triangles are immutable inputs; the strip builder never reorders or
/// rewrites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Vertex indices, in winding order.
    pub v: [u16; 3],
    /// Material id, selecting which output [`Mesh`] this triangle joins.
    pub material: u16,
}

impl Triangle {
    /// Create a triangle from vertex indices and a material id.
    pub fn new(v0: u16, v1: u16, v2: u16, material: u16) -> Self {
        Self {
            v: [v0, v1, v2],
            material,
        }
    }

    /// Whether the triangle repeats a vertex index and therefore has no area.
    ///
    /// Degenerate triangles are tolerated on input: they never connect to
    /// neighbors in the dual graph and are dropped from the emitted streams.
    pub fn is_degenerate(&self) -> bool {
        self.v[0] == self.v[1] || self.v[1] == self.v[2] || self.v[0] == self.v[2]
    }
}

/// How a [`Mesh`]'s index stream is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    /// Three indices per triangle, in input winding.
    TriangleList,
    /// One stitched triangle strip per mesh; degenerate triples are skipped.
    TriangleStrip,
}

/// The index stream for a single material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mesh {
    /// The material all triangles in this mesh belong to.
    pub material: u16,
    /// The index stream. Empty when the material has no triangles.
    pub indices: Vec<u16>,
}

/// A complete per-mesh result: one [`Mesh`] per material, in material order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSet {
    /// How every contained index stream is to be interpreted.
    pub primitive: PrimitiveType,
    /// One mesh per material id, indexed by material.
    pub meshes: Vec<Mesh>,
}

impl MeshSet {
    /// Total number of indices across all meshes.
    pub fn total_indices(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len()).sum()
    }

    /// Decode the triangles represented by this mesh set.
    ///
    /// For [`PrimitiveType::TriangleStrip`] this walks each stream with
    /// [`strip_triangles`], skipping stitch and resync degenerates; for
    /// [`PrimitiveType::TriangleList`] it reads plain index triples. The
    /// result carries each mesh's material id and preserves winding, so for
    /// correct strip output it equals the input triangle set up to cyclic
    /// rotation of each triangle's vertices.
    pub fn triangles(&self) -> Vec<Triangle> {
        let mut out = Vec::new();
        for mesh in &self.meshes {
            match self.primitive {
                PrimitiveType::TriangleList => {
                    for t in mesh.indices.chunks_exact(3) {
                        out.push(Triangle::new(t[0], t[1], t[2], mesh.material));
                    }
                }
                PrimitiveType::TriangleStrip => {
                    for [a, b, c] in strip_triangles(&mesh.indices) {
                        out.push(Triangle::new(a, b, c, mesh.material));
                    }
                }
            }
        }
        out
    }
}

/// Iterator over the non-degenerate triangles encoded by a stitched strip.
///
/// Created by [`strip_triangles`].
#[derive(Debug, Clone)]
pub struct StripTriangles<'a> {
    indices: &'a [u16],
    pos: usize,
}

impl Iterator for StripTriangles<'_> {
    type Item = [u16; 3];

    fn next(&mut self) -> Option<[u16; 3]> {
        while self.pos + 2 < self.indices.len() {
            let k = self.pos;
            self.pos += 1;
            let (a, b, c) = (
                self.indices[k],
                self.indices[k + 1],
                self.indices[k + 2],
            );
            if a == b || b == c || a == c {
                continue;
            }
            // Odd triples flip the leading pair to undo the strip's
            // alternating winding.
            return Some(if k % 2 == 0 { [a, b, c] } else { [b, a, c] });
        }
        None
    }
}

/// Decode a stitched triangle-strip index stream back into triangles.
///
/// Walks overlapping index triples, skipping any triple with a repeated
/// index (the stitch/restart convention) and correcting the alternating
/// winding so every yielded triangle is in its original orientation.
///
/// # Example
///
/// ```
/// use tristrip::mesh::strip_triangles;
///
/// // One strip of two triangles.
/// let decoded: Vec<_> = strip_triangles(&[0, 1, 2, 3]).collect();
/// assert_eq!(decoded, vec![[0, 1, 2], [2, 1, 3]]);
/// ```
pub fn strip_triangles(indices: &[u16]) -> StripTriangles<'_> {
    StripTriangles { indices, pos: 0 }
}

/// Check every triangle against the declared vertex and material bounds.
///
/// Returns the first violation found, or `Ok(())`. Strip and list builders
/// call this before constructing any output, so a malformed input never
/// yields a partial result.
pub fn validate_triangles(
    triangles: &[Triangle],
    num_vertices: usize,
    num_materials: u16,
) -> Result<()> {
    for (i, t) in triangles.iter().enumerate() {
        for &v in &t.v {
            if v as usize >= num_vertices {
                return Err(StripError::InvalidVertexIndex {
                    triangle: i,
                    vertex: v,
                    num_vertices,
                });
            }
        }
        if t.material >= num_materials {
            return Err(StripError::InvalidMaterialId {
                triangle: i,
                material: t.material,
                num_materials,
            });
        }
    }
    Ok(())
}
