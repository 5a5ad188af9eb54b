//! Time-evolving graph primitives.
//!
//! Provides the data model for directed graphs whose edges are valid over
//! contiguous spans of discrete snapshots:
//!
//! - [`TimeInterval`] - inclusive spans of snapshot indices
//! - [`TemporalEdge`] / [`EdgeList`] - validated interval-stamped edge sets
//! - [`CondensedGraph`] - static adjacency with per-edge validity intervals
//! - [`DeltaSequence`] - per-snapshot edge insertion/deletion events
//! - [`label`] - distance-label lists, the piecewise-constant encoding of
//!   "distance from source during time range X"
//!
//! # Edge lifetime model
//!
//! An edge valid over `[s, e]` participates in every snapshot from `s`
//! through `e` inclusive. In the delta view it is inserted going into
//! snapshot `s` and deleted going into snapshot `e + 1`; an edge whose
//! interval reaches the final snapshot never dies.
//!
//! # Example
//!
//! ```rust
//! use chronet_core::{CondensedGraph, DeltaSequence, EdgeList, TemporalEdge};
//!
//! let edges = EdgeList::new(vec![
//!     TemporalEdge::new(0, 1, 0, 2),
//!     TemporalEdge::new(1, 2, 1, 1),
//! ])?;
//!
//! let graph = CondensedGraph::build(&edges);
//! let deltas = DeltaSequence::build(&edges);
//!
//! assert_eq!(graph.num_vertices(), 3);
//! assert_eq!(deltas.deletions(2), &[(1, 2)]);
//! # Ok::<(), chronet_core::Error>(())
//! ```

mod delta;
mod edge;
mod graph;
mod interval;
pub mod label;
mod loader;

pub use delta::DeltaSequence;
pub use edge::{EdgeList, TemporalEdge, VertexId};
pub use graph::{CondensedGraph, GraphStats, OutEdge};
pub use interval::{Snapshot, TimeInterval};
pub use label::DistanceLabel;
pub use loader::load_edge_list;

/// Error types for temporal graph construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// More than one edge for the same ordered vertex pair.
    #[error("duplicate edge ({src}, {target})")]
    DuplicateEdge {
        src: VertexId,
        target: VertexId,
    },

    /// Vertex ids must be dense integers starting at 0.
    #[error("vertex ids are not dense: {count} distinct ids over [{min}, {max}]")]
    SparseVertexIds { min: u32, max: u32, count: usize },

    /// Timestamps must be dense integers starting at 0.
    #[error("timestamps are not dense: {count} distinct values over [{min}, {max}]")]
    SparseTimestamps { min: u32, max: u32, count: usize },

    /// A record in an edge-list file could not be parsed.
    #[error("line {line}: malformed edge record: {message}")]
    Malformed { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
