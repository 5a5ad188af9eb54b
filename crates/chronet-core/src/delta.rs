//! Per-snapshot edge insertion and deletion events.

use crate::edge::{EdgeList, VertexId};

/// The evolution of a temporal graph as per-snapshot edge events.
///
/// Derived once from the same validated [`EdgeList`] as the condensed
/// view. An edge valid over `[s, e]` appears as an insertion at snapshot
/// `s` and as a deletion at snapshot `e + 1` (it is live during `e` and
/// gone going into `e + 1`); edges whose interval reaches the final
/// snapshot produce no deletion event.
#[derive(Debug, Clone)]
pub struct DeltaSequence {
    insertions: Vec<Vec<(VertexId, VertexId)>>,
    deletions: Vec<Vec<(VertexId, VertexId)>>,
}

impl DeltaSequence {
    /// Derive the event sequence from a validated edge list.
    pub fn build(edges: &EdgeList) -> Self {
        let num_snapshots = edges.num_snapshots();
        let mut insertions = vec![Vec::new(); num_snapshots];
        let mut deletions = vec![Vec::new(); num_snapshots];

        for edge in edges.edges() {
            insertions[edge.valid.start as usize].push((edge.source, edge.target));

            let dies_at = edge.valid.end as usize + 1;
            if dies_at < num_snapshots {
                deletions[dies_at].push((edge.source, edge.target));
            }
        }

        Self {
            insertions,
            deletions,
        }
    }

    /// Number of snapshots.
    pub fn num_snapshots(&self) -> usize {
        self.insertions.len()
    }

    /// Edges becoming valid going into snapshot `t`.
    pub fn insertions(&self, t: usize) -> &[(VertexId, VertexId)] {
        &self.insertions[t]
    }

    /// Edges ceasing to be valid going into snapshot `t`.
    pub fn deletions(&self, t: usize) -> &[(VertexId, VertexId)] {
        &self.deletions[t]
    }

    /// Total number of insertion events.
    pub fn total_insertions(&self) -> usize {
        self.insertions.iter().map(Vec::len).sum()
    }

    /// Total number of deletion events.
    pub fn total_deletions(&self) -> usize {
        self.deletions.iter().map(Vec::len).sum()
    }
}
