//! Dual graph construction and greedy strip building.
//!
//! The dual graph has one node per input triangle and an edge wherever two
//! triangles of the same material share a mesh edge with opposite direction
//! (consistent winding). Strips are paths in this graph whose edges carry a
//! `strip` mark; the mark is always toggled on both half-edges at once, so
//! the classification stays symmetric by construction.

use std::collections::HashMap;

use crate::mesh::Triangle;

/// A directed adjacency slot on a node, one per triangle side.
///
/// Slot `j` covers the triangle's directed edge `(v[j], v[(j+1)%3])`.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GraphEdge {
    /// Index of the connected node. Meaningless unless `connected`.
    pub node: usize,
    /// The slot on the connected node that mirrors this one.
    pub other_edge: usize,
    /// Whether a neighboring triangle was found for this side.
    pub connected: bool,
    /// Whether this edge is part of the chosen strip path.
    pub strip: bool,
}

/// One node of the dual graph, owning a copy of its triangle's indices.
#[derive(Debug, Clone)]
pub(crate) struct StripNode {
    /// The triangle's vertex indices, in input winding order.
    pub v: [u16; 3],
    /// Adjacency slots, one per triangle side.
    pub edges: [GraphEdge; 3],
    /// Index of the node starting this node's strip; `None` until assigned.
    pub strip_id: Option<usize>,
    /// Slot of the edge leading back toward the tunnel search start.
    /// Only meaningful while `visited` is set.
    pub parent: usize,
    /// Reached during the current tunnel search.
    pub visited: bool,
    /// This node starts a strip that the current tunnel search touched.
    pub strip_visited: bool,
    /// Currently a member of the end list.
    pub is_end: bool,
}

impl StripNode {
    fn new(v: [u16; 3]) -> Self {
        Self {
            v,
            edges: [GraphEdge::default(); 3],
            strip_id: None,
            parent: 0,
            visited: false,
            strip_visited: false,
            is_end: false,
        }
    }

    fn degenerate(&self) -> bool {
        self.v[0] == self.v[1] || self.v[1] == self.v[2] || self.v[0] == self.v[2]
    }

    /// Number of sides with a connected neighbor.
    pub fn connections(&self) -> usize {
        self.edges.iter().filter(|e| e.connected).count()
    }

    /// Number of sides classified as strip edges.
    pub fn strip_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.strip).count()
    }

    /// A connected node with fewer than two strip edges is a strip boundary.
    pub fn is_strip_end(&self) -> bool {
        self.connections() > 0 && self.strip_edges() < 2
    }
}

/// The working set for one material: the node arena plus the lone and end
/// membership lists.
///
/// Built fresh per material, consumed by the emitter, then dropped; nothing
/// in here outlives one material's processing.
#[derive(Debug)]
pub(crate) struct StripGraph {
    pub nodes: Vec<StripNode>,
    /// Nodes with no connections at all.
    pub lone: Vec<usize>,
    /// Strip boundary nodes, in discovery order.
    pub ends: Vec<usize>,
}

impl StripGraph {
    /// Collect one material's triangles and resolve all adjacency.
    pub fn build(triangles: &[Triangle], material: u16) -> Self {
        let mut graph = Self {
            nodes: triangles
                .iter()
                .filter(|t| t.material == material)
                .map(|t| StripNode::new(t.v))
                .collect(),
            lone: Vec::new(),
            ends: Vec::new(),
        };
        graph.connect();
        graph
    }

    /// Connect nodes sharing an edge, preserving winding.
    ///
    /// A side `(a, b)` only ever pairs with another triangle's side `(b, a)`:
    /// connection requires exact reversal, so two triangles wound
    /// inconsistently never join. Degenerate triangles take no part in
    /// connection discovery and end up lone.
    fn connect(&mut self) {
        // Directed edge -> every (node, slot) that owns it. Multiple owners
        // happen on non-manifold input; pairing is then first-found.
        let mut owners: HashMap<(u16, u16), Vec<(usize, usize)>> = HashMap::new();
        for (i, n) in self.nodes.iter().enumerate() {
            if n.degenerate() {
                continue;
            }
            for j in 0..3 {
                let key = (n.v[j], n.v[(j + 1) % 3]);
                owners.entry(key).or_default().push((i, j));
            }
        }

        for i in 0..self.nodes.len() {
            if self.nodes[i].degenerate() {
                continue;
            }
            for j in 0..3 {
                if self.nodes[i].edges[j].connected {
                    continue;
                }
                // Flip the edge and look for an unconnected owner.
                let key = (self.nodes[i].v[(j + 1) % 3], self.nodes[i].v[j]);
                let Some(candidates) = owners.get(&key) else {
                    continue;
                };
                let found = candidates
                    .iter()
                    .find(|&&(ni, sj)| ni != i && !self.nodes[ni].edges[sj].connected);
                if let Some(&(ni, sj)) = found {
                    self.nodes[i].edges[j] = GraphEdge {
                        node: ni,
                        other_edge: sj,
                        connected: true,
                        strip: false,
                    };
                    self.nodes[ni].edges[sj] = GraphEdge {
                        node: i,
                        other_edge: j,
                        connected: true,
                        strip: false,
                    };
                }
            }
        }
    }

    /// Toggle the strip classification of an edge and its mirror.
    ///
    /// This is the only mutator of the strip flag; going through it keeps the
    /// two half-edges in agreement.
    pub fn complement_edge(&mut self, node: usize, slot: usize) {
        let e = self.nodes[node].edges[slot];
        debug_assert!(e.connected);
        self.nodes[node].edges[slot].strip = !self.nodes[node].edges[slot].strip;
        self.nodes[e.node].edges[e.other_edge].strip =
            !self.nodes[e.node].edges[e.other_edge].strip;
    }

    /// Assign every node to exactly one strip by greedy extension.
    pub fn build_strips(&mut self) {
        for i in 0..self.nodes.len() {
            if self.nodes[i].strip_id.is_some() {
                continue;
            }
            self.nodes[i].strip_id = Some(i);
            self.extend_strip(i);
        }
    }

    /// Extend a strip from `start` until every neighbor is already claimed.
    ///
    /// First-found wins when a node offers several unclaimed neighbors, so
    /// strip shape is input-order dependent. No attempt is made to join an
    /// existing strip; that is the tunnel optimizer's job.
    fn extend_strip(&mut self, start: usize) {
        if self.nodes[start].connections() == 0 {
            self.lone.push(start);
            return;
        }
        self.ends.push(start);
        self.nodes[start].is_end = true;

        let mut n = start;
        'extend: loop {
            for slot in 0..3 {
                let e = self.nodes[n].edges[slot];
                if !e.connected || self.nodes[e.node].strip_id.is_some() {
                    continue;
                }
                self.nodes[e.node].strip_id = self.nodes[n].strip_id;
                self.complement_edge(n, slot);
                n = e.node;
                continue 'extend;
            }
            break;
        }
        if n != start {
            self.ends.push(n);
            self.nodes[n].is_end = true;
        }
    }

    /// Number of independent strips (lone nodes not included).
    ///
    /// Every strip has exactly one end node whose strip id is its own index:
    /// the node the greedy builder or the end-list rebuild started from.
    pub fn strip_count(&self) -> usize {
        self.ends
            .iter()
            .filter(|&&n| self.nodes[n].strip_id == Some(n))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(v0: u16, v1: u16, v2: u16) -> Triangle {
        Triangle::new(v0, v1, v2, 0)
    }

    /// A fan of `n` triangles around vertex 0, each sharing an edge with the
    /// next: (0, i+1, i+2).
    fn fan(n: u16) -> Vec<Triangle> {
        (0..n).map(|i| tri(0, i + 1, i + 2)).collect()
    }

    #[test]
    fn test_connect_shared_edge() {
        let graph = StripGraph::build(&[tri(0, 1, 2), tri(2, 1, 3)], 0);

        // Triangle 0 owns (1,2) on slot 1; triangle 1 owns (2,1) on slot 0.
        let e = graph.nodes[0].edges[1];
        assert!(e.connected);
        assert_eq!(e.node, 1);
        assert_eq!(e.other_edge, 0);

        let m = graph.nodes[1].edges[0];
        assert!(m.connected);
        assert_eq!(m.node, 0);
        assert_eq!(m.other_edge, 1);

        assert_eq!(graph.nodes[0].connections(), 1);
        assert_eq!(graph.nodes[1].connections(), 1);
    }

    #[test]
    fn test_no_connection_on_same_winding() {
        // Both triangles own the directed edge (1,2); without reversal they
        // must not connect.
        let graph = StripGraph::build(&[tri(0, 1, 2), tri(1, 2, 3)], 0);
        assert_eq!(graph.nodes[0].connections(), 0);
        assert_eq!(graph.nodes[1].connections(), 0);
    }

    #[test]
    fn test_material_filter() {
        let tris = [
            Triangle::new(0, 1, 2, 0),
            Triangle::new(2, 1, 3, 1),
            Triangle::new(2, 1, 3, 0),
        ];
        let graph = StripGraph::build(&tris, 0);
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.nodes[0].edges[1].connected);
    }

    #[test]
    fn test_degenerate_never_connects() {
        // The degenerate triangle owns (2,1) but must stay lone.
        let mut graph = StripGraph::build(&[tri(0, 1, 2), tri(2, 1, 1)], 0);
        assert_eq!(graph.nodes[0].connections(), 0);
        assert_eq!(graph.nodes[1].connections(), 0);

        graph.build_strips();
        assert_eq!(graph.lone.len(), 2);
        assert!(graph.ends.is_empty());
    }

    #[test]
    fn test_build_strips_two_triangles() {
        let mut graph = StripGraph::build(&[tri(0, 1, 2), tri(2, 1, 3)], 0);
        graph.build_strips();

        assert_eq!(graph.nodes[0].strip_id, Some(0));
        assert_eq!(graph.nodes[1].strip_id, Some(0));
        assert_eq!(graph.ends, vec![0, 1]);
        assert!(graph.lone.is_empty());
        assert_eq!(graph.strip_count(), 1);

        // The shared edge is now a strip edge on both sides.
        assert!(graph.nodes[0].edges[1].strip);
        assert!(graph.nodes[1].edges[0].strip);
    }

    #[test]
    fn test_strip_flags_stay_symmetric() {
        let mut graph = StripGraph::build(&fan(6), 0);
        graph.build_strips();

        for n in &graph.nodes {
            for e in &n.edges {
                if e.connected {
                    let mirror = graph.nodes[e.node].edges[e.other_edge];
                    assert_eq!(e.strip, mirror.strip);
                }
            }
        }
    }

    #[test]
    fn test_at_most_two_strip_edges() {
        let mut graph = StripGraph::build(&fan(8), 0);
        graph.build_strips();
        for n in &graph.nodes {
            assert!(n.strip_edges() <= 2);
        }
    }

    #[test]
    fn test_fan_builds_single_strip() {
        // A fan is a simple path in the dual graph; greedy extension from
        // node 0 claims all of it.
        let mut graph = StripGraph::build(&fan(5), 0);
        graph.build_strips();
        assert_eq!(graph.strip_count(), 1);
        for n in &graph.nodes {
            assert_eq!(n.strip_id, Some(0));
        }
    }

    #[test]
    fn test_every_node_claimed() {
        let mut graph = StripGraph::build(&fan(7), 0);
        graph.build_strips();
        assert!(graph.nodes.iter().all(|n| n.strip_id.is_some()));
    }

    #[test]
    fn test_empty_material() {
        let mut graph = StripGraph::build(&[], 3);
        graph.build_strips();
        assert!(graph.nodes.is_empty());
        assert!(graph.ends.is_empty());
        assert!(graph.lone.is_empty());
        assert_eq!(graph.strip_count(), 0);
    }
}
