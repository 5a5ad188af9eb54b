//! Snapshot-at-a-time baseline.

use crate::score::closeness_score;
use chronet_core::{CondensedGraph, Snapshot, VertexId};

/// Closeness centrality of `source` at a single snapshot.
///
/// Plain BFS over the condensed graph restricted to edges whose validity
/// interval covers `t`. Quadratic in the number of snapshots when used
/// for the full range; kept as the reference oracle for the two real
/// engines.
#[must_use]
pub fn snapshot_centrality(graph: &CondensedGraph, source: VertexId, t: Snapshot) -> f64 {
    let num_vertices = graph.num_vertices();
    let mut visited = vec![false; num_vertices];

    let mut current = vec![source];
    let mut next = Vec::new();
    visited[source as usize] = true;

    let mut depth = 0u64;
    let mut total_distance = 0u64;
    let mut reachable = 0usize;

    while !current.is_empty() {
        total_distance += depth * current.len() as u64;
        reachable += current.len();

        for &vertex in &current {
            for edge in graph.outgoing_at(vertex, t) {
                if !visited[edge.target as usize] {
                    visited[edge.target as usize] = true;
                    next.push(edge.target);
                }
            }
        }

        std::mem::swap(&mut current, &mut next);
        next.clear();
        depth += 1;
    }

    closeness_score(reachable, total_distance, num_vertices)
}

/// Closeness centrality of `source` at every snapshot, one BFS each.
#[must_use]
pub fn snapshot_based_centrality(graph: &CondensedGraph, source: VertexId) -> Vec<f64> {
    (0..graph.num_snapshots())
        .map(|t| snapshot_centrality(graph, source, t as Snapshot))
        .collect()
}
