//! Condensed adjacency over the full snapshot range.

use crate::edge::{EdgeList, VertexId};
use crate::interval::{Snapshot, TimeInterval};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An outgoing edge in the condensed view: target plus validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutEdge {
    /// Target vertex id.
    pub target: VertexId,
    /// Snapshots during which the edge exists.
    pub valid: TimeInterval,
}

/// Static adjacency where each edge carries its full validity interval.
///
/// Built once from a validated [`EdgeList`] and read-only afterwards.
/// Each vertex's outgoing edges are sorted by target id. Because every
/// edge appears exactly once with its whole lifetime attached, a single
/// traversal can reason about all snapshots at once.
#[derive(Debug, Clone)]
pub struct CondensedGraph {
    num_snapshots: usize,
    num_edges: usize,
    outgoing: Vec<SmallVec<[OutEdge; 4]>>,
}

impl CondensedGraph {
    /// Build the condensed adjacency from a validated edge list.
    pub fn build(edges: &EdgeList) -> Self {
        let mut outgoing: Vec<SmallVec<[OutEdge; 4]>> =
            vec![SmallVec::new(); edges.num_vertices()];

        for edge in edges.edges() {
            outgoing[edge.source as usize].push(OutEdge {
                target: edge.target,
                valid: edge.valid,
            });
        }

        for list in &mut outgoing {
            list.sort_unstable_by_key(|e| e.target);
        }

        Self {
            num_snapshots: edges.num_snapshots(),
            num_edges: edges.len(),
            outgoing,
        }
    }

    /// Outgoing edges of a vertex, sorted by target id.
    pub fn outgoing(&self, vertex: VertexId) -> &[OutEdge] {
        &self.outgoing[vertex as usize]
    }

    /// Outgoing edges of a vertex that exist at snapshot `t`.
    pub fn outgoing_at(&self, vertex: VertexId, t: Snapshot) -> impl Iterator<Item = &OutEdge> + '_ {
        self.outgoing[vertex as usize]
            .iter()
            .filter(move |e| e.valid.contains(t))
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.outgoing.len()
    }

    /// Number of snapshots.
    pub fn num_snapshots(&self) -> usize {
        self.num_snapshots
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Out-degree of a vertex across all snapshots.
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outgoing[vertex as usize].len()
    }

    /// Vertex with the highest out-degree, if the graph is non-empty.
    pub fn max_degree_vertex(&self) -> Option<VertexId> {
        (0..self.outgoing.len())
            .max_by_key(|&v| self.outgoing[v].len())
            .map(|v| v as VertexId)
    }

    /// Compute summary statistics.
    pub fn stats(&self) -> GraphStats {
        let num_vertices = self.num_vertices();
        let max_out_degree = self.outgoing.iter().map(SmallVec::len).max().unwrap_or(0);

        let avg_out_degree = if num_vertices > 0 {
            self.num_edges as f64 / num_vertices as f64
        } else {
            0.0
        };

        GraphStats {
            num_vertices,
            num_snapshots: self.num_snapshots,
            num_edges: self.num_edges,
            max_out_degree,
            avg_out_degree,
        }
    }
}

/// Summary statistics about a condensed graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of vertices.
    pub num_vertices: usize,
    /// Number of snapshots.
    pub num_snapshots: usize,
    /// Number of edges.
    pub num_edges: usize,
    /// Highest out-degree over all vertices.
    pub max_out_degree: usize,
    /// Average out-degree.
    pub avg_out_degree: f64,
}
