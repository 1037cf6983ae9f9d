//! Mesh emitter: turns a finished strip graph into a stitched index stream.
//!
//! The output follows the hardware tristrip convention: overlapping index
//! triples form triangles with alternating winding, and independent runs
//! are fused into one stream by duplicating indices so that every triple
//! spanning a seam is degenerate. Three mechanisms cooperate:
//!
//! - a parity (`even`) threaded across the whole mesh decides the vertex
//!   order of each run's first triangle, so the alternation stays coherent
//!   after concatenation;
//! - a 2-index *stitch* (previous run's last index, next run's first index)
//!   joins runs;
//! - a single duplicate index re-synchronizes the alternation whenever the
//!   strip turns the same way twice in a row, since a raw strip can only
//!   express alternating turns.

use super::graph::StripGraph;
use crate::algo::trace::{Trace, TraceEvent};
use crate::mesh::Mesh;

/// Emit the index stream for one material's strip graph.
///
/// Strips are emitted first (every end node owning its strip id), then lone
/// triangles. Degenerate input triangles are dropped here: they never
/// connected to anything, so they surface as lone nodes with a repeated
/// vertex index.
pub(crate) fn emit_mesh(graph: &StripGraph, material: u16, trace: &Trace) -> Mesh {
    let mut indices = Vec::with_capacity(graph.nodes.len() * 3);
    let mut runs = 0;

    for &end in &graph.ends {
        if graph.nodes[end].strip_id != Some(end) {
            continue;
        }
        emit_strip(graph, end, &mut indices);
        runs += 1;
    }

    for &lone in &graph.lone {
        let v = graph.nodes[lone].v;
        if v[0] == v[1] || v[1] == v[2] || v[0] == v[2] {
            continue;
        }
        emit_isolated(v, &mut indices);
        runs += 1;
    }

    trace.emit(TraceEvent::MeshEmitted {
        material,
        runs,
        indices: indices.len(),
    });
    Mesh { material, indices }
}

/// Walk one strip from its start node, appending its index run.
fn emit_strip(graph: &StripGraph, start: usize, indices: &mut Vec<u16>) {
    let node = &graph.nodes[start];
    // A start node carries at most one strip edge; none at all means a
    // one-triangle strip.
    let Some(exit) = (0..3).find(|&s| node.edges[s].strip) else {
        emit_isolated(node.v, indices);
        return;
    };

    // First triangle: the vertex opposite the exit edge leads, followed by
    // the exit edge itself, ordered so the next triangle continues the
    // alternation. Both orders decode to a rotation of the input winding.
    let a = node.v[exit];
    let b = node.v[(exit + 1) % 3];
    let w = node.v[(exit + 2) % 3];
    stitch(indices, w);
    if indices.len() % 2 == 0 {
        indices.extend_from_slice(&[w, a, b]);
    } else {
        indices.extend_from_slice(&[w, b, a]);
    }

    let mut cur = node.edges[exit].node;
    let mut entry = node.edges[exit].other_edge;
    loop {
        let node = &graph.nodes[cur];
        // The vertex this triangle adds: the one opposite its entry edge.
        let w = node.v[(entry + 2) % 3];
        let exit = (0..3).find(|&s| s != entry && node.edges[s].strip);
        let Some(exit) = exit else {
            indices.push(w);
            break;
        };

        // At the current parity only one of the two possible exit edges
        // lines up with the strip's implicit alternation; leaving on the
        // other one needs a duplicate index first.
        let parity_odd = (indices.len() - 2) % 2 == 1;
        let aligned = if parity_odd {
            (entry + 2) % 3
        } else {
            (entry + 1) % 3
        };
        if exit != aligned {
            let resync = indices[indices.len() - 2];
            indices.push(resync);
        }
        indices.push(w);

        entry = node.edges[exit].other_edge;
        cur = node.edges[exit].node;
    }
}

/// Append a single triangle as an independent 3-index run.
fn emit_isolated(v: [u16; 3], indices: &mut Vec<u16>) {
    let even = indices.len() % 2 == 0;
    let first = if even { v[0] } else { v[1] };
    stitch(indices, first);
    if even {
        indices.extend_from_slice(&[v[0], v[1], v[2]]);
    } else {
        indices.extend_from_slice(&[v[1], v[0], v[2]]);
    }
}

/// Join the previous run to the next with two duplicated indices.
///
/// Repeating the last emitted index and the next run's first index makes
/// every triple across the seam contain a repeat, so a consumer walking the
/// stream sees only degenerate triangles between runs.
fn stitch(indices: &mut Vec<u16>, first: u16) {
    if let Some(&last) = indices.last() {
        indices.push(last);
        indices.push(first);
    }
}
