//! Range propagation: one traversal for the whole snapshot range.

use crate::score::closeness_score;
use chronet_core::label::{self, DistanceLabel};
use chronet_core::{CondensedGraph, VertexId};
use tracing::debug;

/// Compute every vertex's full time-indexed distance function from
/// `source`.
///
/// Level-synchronous traversal of the condensed graph where each visit
/// carries a label list instead of a scalar distance. The source starts
/// with distance 0 over the whole snapshot range; at each level, labels
/// are pushed across every outgoing edge's validity window and merged
/// into the neighbour's accumulated list. Only the sub-ranges that
/// actually improved are carried into the next frontier, so the loop
/// terminates once no label can get any shorter.
///
/// Cost is independent of the number of snapshots except through the
/// length of the label lists being merged.
#[must_use]
pub fn propagate_labels(graph: &CondensedGraph, source: VertexId) -> Vec<Vec<DistanceLabel>> {
    let num_vertices = graph.num_vertices();
    let num_snapshots = graph.num_snapshots();

    let mut all_labels: Vec<Vec<DistanceLabel>> = vec![Vec::new(); num_vertices];
    if num_vertices == 0 || num_snapshots == 0 {
        return all_labels;
    }

    let root = DistanceLabel::new(0, num_snapshots as u32 - 1, 0);
    all_labels[source as usize].push(root);

    let mut current = vec![(source, vec![root])];
    let mut next = Vec::new();

    while !current.is_empty() {
        for (vertex, labels) in current.drain(..) {
            for edge in graph.outgoing(vertex) {
                let mut crossed = label::go_through_edge(&labels, edge.valid);
                if crossed.is_empty() {
                    continue;
                }
                label::simplify(&mut crossed);

                let accumulated = &mut all_labels[edge.target as usize];
                let mut improved = label::merge_into(accumulated, &crossed);
                label::simplify(accumulated);

                if !improved.is_empty() {
                    label::simplify(&mut improved);
                    next.push((edge.target, improved));
                }
            }
        }

        std::mem::swap(&mut current, &mut next);
    }

    all_labels
}

/// Closeness centrality of `source` at every snapshot, via range
/// propagation.
#[must_use]
pub fn range_centrality(graph: &CondensedGraph, source: VertexId) -> Vec<f64> {
    debug!(source, "range-based centrality");

    let num_snapshots = graph.num_snapshots();
    let labels = propagate_labels(graph, source);

    let mut total_distance = vec![0u64; num_snapshots];
    let mut reachable = vec![0usize; num_snapshots];

    for list in &labels {
        for label in list {
            for t in label.interval.start..=label.interval.end {
                total_distance[t as usize] += u64::from(label.distance);
                reachable[t as usize] += 1;
            }
        }
    }

    (0..num_snapshots)
        .map(|t| closeness_score(reachable[t], total_distance[t], graph.num_vertices()))
        .collect()
}
