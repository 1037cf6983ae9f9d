//! Error types for tristrip.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`StripError`].
pub type Result<T> = std::result::Result<T, StripError>;

/// Errors that can occur during strip generation or verification.
///
/// Errors fall into two classes: *invalid mesh* errors describe malformed
/// input and are reported before any output is produced, while *internal*
/// errors are raised by the verifier when an emitted index stream does not
/// reproduce the input triangle set. The latter indicate a bug in the strip
/// builder rather than a problem with the caller's data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    /// A triangle references a vertex index outside the vertex buffer.
    #[error("triangle {triangle} references vertex {vertex} but the mesh has {num_vertices} vertices")]
    InvalidVertexIndex {
        /// The offending triangle's position in the input.
        triangle: usize,
        /// The out-of-range vertex index.
        vertex: u16,
        /// The declared vertex count.
        num_vertices: usize,
    },

    /// A triangle references a material id outside the material list.
    #[error("triangle {triangle} references material {material} but the mesh has {num_materials} materials")]
    InvalidMaterialId {
        /// The offending triangle's position in the input.
        triangle: usize,
        /// The out-of-range material id.
        material: u16,
        /// The declared material count.
        num_materials: u16,
    },

    /// An emitted index stream decodes to a triangle that is not in the input.
    #[error("mesh for material {material} contains triangle ({v0}, {v1}, {v2}) that does not match any input triangle")]
    UnmatchedOutputTriangle {
        /// Material id of the offending mesh.
        material: u16,
        /// First vertex of the decoded triangle.
        v0: u16,
        /// Second vertex of the decoded triangle.
        v1: u16,
        /// Third vertex of the decoded triangle.
        v2: u16,
    },

    /// Input triangles are missing from the emitted index streams.
    #[error("{count} input triangle(s) of material {material} are missing from the emitted meshes")]
    MissingInputTriangles {
        /// Material id whose mesh is incomplete.
        material: u16,
        /// Number of unmatched input triangles.
        count: usize,
    },
}

impl StripError {
    /// Whether this error describes malformed input (the `InvalidMesh` class).
    pub fn is_invalid_mesh(&self) -> bool {
        matches!(
            self,
            StripError::InvalidVertexIndex { .. } | StripError::InvalidMaterialId { .. }
        )
    }

    /// Whether this error reports an internal invariant violation detected by
    /// the verifier (the `StripificationInternal` class).
    pub fn is_internal(&self) -> bool {
        !self.is_invalid_mesh()
    }
}
