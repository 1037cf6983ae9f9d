//! Tunnel optimizer: fuses strip fragments via alternating graph search.
//!
//! A *tunnel* is a path between two loose strip ends whose edges alternate
//! non-strip, strip, non-strip, ... Complementing the classification of
//! every edge on such a path joins the two end strips into one: the path's
//! interior nodes keep their strip-edge count (one edge turned off, one
//! turned on) while each endpoint gains exactly one. Every successful
//! tunnel therefore adds one strip edge to a cycle-free degree-at-most-two
//! subgraph and reduces the strip count by exactly one, which also bounds
//! the number of iterations.

use std::collections::VecDeque;

use super::graph::StripGraph;
use crate::algo::trace::{Trace, TraceEvent};

/// Repeatedly search for tunnels and apply them until none is found.
pub(crate) fn tunnel(graph: &mut StripGraph, material: u16, trace: &Trace) {
    'restart: loop {
        for i in 0..graph.ends.len() {
            let start = graph.ends[i];
            if let Some(end) = find_tunnel(graph, start) {
                let path_edges = apply_tunnel(graph, end, start);
                reset_search(graph);
                trace.emit(TraceEvent::TunnelApplied {
                    material,
                    path_edges,
                });
                // The end list just changed under us; restart the scan.
                continue 'restart;
            }
            reset_search(graph);
        }
        break;
    }
    trace.emit(TraceEvent::TunnelDone {
        material,
        strips: graph.strip_count(),
    });
}

/// Breadth-first search for an alternating path from the end node `start`
/// to some other end node.
///
/// Each frontier entry carries the edge classification it must leave on;
/// the first hop is non-strip and the parity flips with every hop. The
/// search succeeds the moment another end node is reached via a non-strip
/// edge, leaving a parent-edge chain for [`apply_tunnel`] to walk back.
///
/// Two rules keep the strip subgraph a union of simple paths:
/// - a non-strip hop between two nodes of the same strip is rejected
///   (a length-one tunnel inside one strip would close it into a loop);
/// - the start node is marked visited up front, so a search can never
///   terminate on its own starting end.
fn find_tunnel(graph: &mut StripGraph, start: usize) -> Option<usize> {
    let mut frontier = VecDeque::new();
    graph.nodes[start].visited = true;
    // The start's strip always gains an edge on success, so it counts as
    // touched for the end-list rebuild.
    if let Some(sid) = graph.nodes[start].strip_id {
        graph.nodes[sid].strip_visited = true;
    }
    frontier.push_back((start, false));

    while let Some((n, out_strip)) = frontier.pop_front() {
        for slot in 0..3 {
            let e = graph.nodes[n].edges[slot];
            if !e.connected || e.strip != out_strip {
                continue;
            }
            let nn = e.node;

            // An already visited node was reached by a shorter path.
            if graph.nodes[nn].visited {
                continue;
            }

            // No non-strip shortcuts within one strip.
            if !out_strip && graph.nodes[n].strip_id == graph.nodes[nn].strip_id {
                continue;
            }

            let is_end = graph.nodes[nn].is_strip_end();

            // End nodes reached via a strip edge are not expanded further.
            if is_end && out_strip {
                continue;
            }

            graph.nodes[nn].parent = e.other_edge;
            graph.nodes[nn].visited = true;
            if let Some(sid) = graph.nodes[nn].strip_id {
                graph.nodes[sid].strip_visited = true;
            }

            if is_end && !out_strip {
                return Some(nn);
            }

            frontier.push_back((nn, !out_strip));
        }
    }
    None
}

/// Complement every edge on the recorded path from `end` back to `start`,
/// then bring the end list back in sync. Returns the path length in edges.
fn apply_tunnel(graph: &mut StripGraph, end: usize, start: usize) -> usize {
    let mut path_edges = 0;
    let mut n = end;
    while n != start {
        let slot = graph.nodes[n].parent;
        let next = graph.nodes[n].edges[slot].node;
        graph.complement_edge(n, slot);
        path_edges += 1;
        n = next;
    }
    rebuild_ends(graph);
    path_edges
}

/// Rebuild the end list after a tunnel changed strip classifications.
///
/// Every post-toggle end was already on the list (interior path nodes keep
/// their strip-edge count; the two endpoints gain one), so it suffices to
/// re-examine old members. Ends of strips the search never touched keep
/// their id and their slot; each touched strip is re-walked from the first
/// of its ends encountered, which assigns the fresh strip id and locates
/// the opposite end.
fn rebuild_ends(graph: &mut StripGraph) {
    let old = std::mem::take(&mut graph.ends);
    let mut ends = Vec::with_capacity(old.len());
    for &n in &old {
        if !graph.nodes[n].is_end {
            // Consumed by an earlier walk in this rebuild.
            continue;
        }
        let touched = graph.nodes[n]
            .strip_id
            .is_some_and(|sid| graph.nodes[sid].strip_visited);
        if !touched {
            ends.push(n);
            continue;
        }
        graph.nodes[n].is_end = false;
        if !graph.nodes[n].is_strip_end() {
            // Fused into a strip interior by the toggle.
            continue;
        }
        graph.nodes[n].strip_id = Some(n);
        let other = walk_strip(graph, n);
        ends.push(n);
        if let Some(o) = other {
            ends.push(o);
        }
    }
    // End flags come back only now: a walk's opposite end must stay
    // unflagged until the loop over the old list is done, or it would be
    // processed a second time.
    for &n in &ends {
        graph.nodes[n].is_end = true;
    }
    graph.ends = ends;
}

/// Walk a strip from one end, relabeling every node with the start's strip
/// id and clearing stale end flags. Returns the opposite end, or `None` for
/// a one-node strip.
fn walk_strip(graph: &mut StripGraph, start: usize) -> Option<usize> {
    let mut n = start;
    let mut entry: Option<usize> = None;
    loop {
        graph.nodes[n].is_end = false;
        if n != start && graph.nodes[n].is_strip_end() {
            return Some(n);
        }
        let next = (0..3).find_map(|slot| {
            let e = graph.nodes[n].edges[slot];
            (e.strip && Some(slot) != entry).then_some(e)
        });
        match next {
            Some(e) => {
                graph.nodes[e.node].strip_id = graph.nodes[n].strip_id;
                entry = Some(e.other_edge);
                n = e.node;
            }
            None => return None,
        }
    }
}

/// Clear all per-search node state.
fn reset_search(graph: &mut StripGraph) {
    for n in &mut graph.nodes {
        n.visited = false;
        n.strip_visited = false;
    }
}
