//! Error types for flow construction and solving.

use thiserror::Error;

/// Errors raised by the residual-graph builder and the solvers.
///
/// Input checks run before any flow is pushed. Only `NegativeCycle` can
/// surface mid-solve, and the partly solved graph is dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Source or sink index is not a vertex of the graph.
    #[error("{role} vertex {vertex} out of range (graph has {vertex_count} vertices)")]
    VertexOutOfRange {
        role: &'static str,
        vertex: usize,
        vertex_count: usize,
    },

    /// Source and sink are the same vertex.
    #[error("source and sink are the same vertex ({0})")]
    SourceIsSink(usize),

    /// An input edge carries a negative capacity.
    #[error("edge {edge} has negative capacity {capacity}")]
    NegativeCapacity { edge: usize, capacity: String },

    /// Requested target flow is negative.
    #[error("target flow must be non-negative, got {0}")]
    InvalidTarget(String),

    /// Shortest-path search kept relaxing a vertex: a negative cycle is
    /// still reachable from the source.
    #[error("negative cycle not fully canceled (vertex {vertex} relaxed too often)")]
    NegativeCycle { vertex: usize },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FlowError>;
