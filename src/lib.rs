//! Triangle strip generation for indexed meshes.
//!
//! `tristrip` converts a material-tagged triangle soup into one stitched
//! triangle-strip index stream per material, ready for hardware submission.
//! The pipeline builds a dual graph over the triangles (nodes are
//! triangles, edges are shared mesh edges with consistent winding), grows
//! greedy strips over it, optionally fuses strip fragments with a tunnel
//! search, and emits a single stream per material in which independent runs
//! are joined by degenerate stitch triangles.
//!
//! A plain triangle-list path and a round-trip verifier are included; the
//! verifier proves an emitted stream decodes to exactly the input triangles
//! (up to cyclic rotation of each triangle's vertices).
//!
//! # Example
//!
//! ```
//! use tristrip::prelude::*;
//!
//! let tris = vec![
//!     Triangle::new(0, 1, 2, 0),
//!     Triangle::new(2, 1, 3, 0),
//! ];
//! let meshes = build_tristrips(&tris, 4, 1, &StripifyOptions::default())?;
//! assert_eq!(meshes.meshes[0].indices, vec![0, 1, 2, 3]);
//!
//! verify_meshes(&tris, &meshes)?;
//! # Ok::<(), StripError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Commonly used types and functions.
pub mod prelude {
    pub use crate::algo::stripify::{
        build_tristrips, build_tristrips_with_trace, verify_meshes, StripifyOptions,
    };
    pub use crate::algo::trace::{Trace, TraceEvent};
    pub use crate::algo::trilist::build_trilist;
    pub use crate::error::{Result, StripError};
    pub use crate::mesh::{strip_triangles, Mesh, MeshSet, PrimitiveType, Triangle};
}
