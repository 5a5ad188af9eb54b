//! Closeness centrality over time-evolving graphs.
//!
//! Given a query vertex, produces one centrality value per snapshot. Two
//! independent engines are provided and must agree exactly:
//!
//! - [`range_centrality`] - interval-labelled level-synchronous
//!   propagation over the condensed graph; handles the entire snapshot
//!   range in one traversal.
//! - [`dynamic_centrality`] - a per-source shortest-path DAG
//!   ([`SsspDag`]) built once and repaired incrementally as edges appear
//!   and disappear snapshot by snapshot.
//!
//! A third, snapshot-at-a-time baseline ([`snapshot_based_centrality`])
//! recomputes each snapshot from scratch; it is slow but obviously
//! correct, which makes it the tie-breaking oracle when the two engines
//! disagree.
//!
//! # Example
//!
//! ```rust
//! use chronet_core::{CondensedGraph, DeltaSequence, EdgeList, TemporalEdge};
//! use chronet_centrality::{dynamic_centrality, range_centrality};
//!
//! let edges = EdgeList::new(vec![
//!     TemporalEdge::new(0, 1, 0, 1),
//!     TemporalEdge::new(1, 2, 0, 0),
//!     TemporalEdge::new(2, 0, 0, 1),
//! ])?;
//! let graph = CondensedGraph::build(&edges);
//! let deltas = DeltaSequence::build(&edges);
//!
//! let by_range = range_centrality(&graph, 0);
//! let by_replay = dynamic_centrality(&deltas, graph.num_vertices(), 0);
//!
//! for (a, b) in by_range.iter().zip(&by_replay) {
//!     assert!((a - b).abs() < 1e-7);
//! }
//! # Ok::<(), chronet_core::Error>(())
//! ```

mod dynamic;
mod range;
mod score;
mod snapshot;
mod sssp;

pub use dynamic::{centrality_for_sources, dynamic_centrality, Engine};
pub use range::{propagate_labels, range_centrality};
pub use score::closeness_score;
pub use snapshot::{snapshot_based_centrality, snapshot_centrality};
pub use sssp::SsspDag;
