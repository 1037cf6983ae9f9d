//! Triangle strip generation.
//!
//! The pipeline runs once per material: collect that material's triangles
//! into a dual graph where nodes are triangles and edges are shared mesh
//! edges with opposite winding, grow greedy strips over it, optionally fuse
//! strip fragments with the tunnel optimizer, and emit one stitched index
//! stream per material.
//!
//! ```
//! use tristrip::algo::stripify::{build_tristrips, StripifyOptions};
//! use tristrip::mesh::Triangle;
//!
//! let tris = [Triangle::new(0, 1, 2, 0), Triangle::new(2, 1, 3, 0)];
//! let meshes = build_tristrips(&tris, 4, 1, &StripifyOptions::default())?;
//! assert_eq!(meshes.meshes[0].indices, vec![0, 1, 2, 3]);
//! # Ok::<(), tristrip::error::StripError>(())
//! ```

mod emit;
mod graph;
mod tunnel;
mod verify;

pub use verify::verify_meshes;

use crate::algo::trace::{Trace, TraceEvent};
use crate::error::Result;
use crate::mesh::{validate_triangles, MeshSet, PrimitiveType, Triangle};

use self::graph::StripGraph;

/// Tuning knobs for [`build_tristrips`].
#[derive(Debug, Clone)]
pub struct StripifyOptions {
    /// Run the tunnel optimizer after greedy strip building. Costs extra
    /// time on large meshes but usually cuts the strip count noticeably.
    pub tunnel: bool,
}

impl Default for StripifyOptions {
    fn default() -> Self {
        Self { tunnel: true }
    }
}

impl StripifyOptions {
    /// Enable or disable the tunnel optimizer.
    pub fn with_tunnel(mut self, tunnel: bool) -> Self {
        self.tunnel = tunnel;
        self
    }
}

/// Build one triangle strip mesh per material.
///
/// The result always contains exactly `num_materials` meshes, in material
/// order; a material with no triangles gets an empty index stream.
/// Degenerate triangles (repeated vertex index) are dropped from the
/// output.
///
/// # Errors
///
/// [`StripError::InvalidVertexIndex`](crate::error::StripError::InvalidVertexIndex)
/// or
/// [`StripError::InvalidMaterialId`](crate::error::StripError::InvalidMaterialId)
/// if the input references a vertex or material out of range. Validation
/// happens before any strip work, so an error never leaves partial output
/// behind.
pub fn build_tristrips(
    triangles: &[Triangle],
    num_vertices: usize,
    num_materials: u16,
    options: &StripifyOptions,
) -> Result<MeshSet> {
    build_tristrips_with_trace(triangles, num_vertices, num_materials, options, &Trace::none())
}

/// Like [`build_tristrips`], reporting pipeline events to `trace`.
pub fn build_tristrips_with_trace(
    triangles: &[Triangle],
    num_vertices: usize,
    num_materials: u16,
    options: &StripifyOptions,
    trace: &Trace,
) -> Result<MeshSet> {
    validate_triangles(triangles, num_vertices, num_materials)?;

    let mut meshes = Vec::with_capacity(num_materials as usize);
    for material in 0..num_materials {
        let mut graph = StripGraph::build(triangles, material);
        graph.build_strips();
        trace.emit(TraceEvent::GraphBuilt {
            material,
            nodes: graph.nodes.len(),
            lone: graph.lone.len(),
            ends: graph.ends.len(),
        });
        trace.emit(TraceEvent::StripsBuilt {
            material,
            strips: graph.strip_count(),
        });

        if options.tunnel {
            tunnel::tunnel(&mut graph, material, trace);
        }

        meshes.push(emit::emit_mesh(&graph, material, trace));
    }

    Ok(MeshSet {
        primitive: PrimitiveType::TriangleStrip,
        meshes,
    })
}
