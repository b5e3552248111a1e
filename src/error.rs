//! Error types for graph construction, the algorithm engines and the
//! graph loaders.

use thiserror::Error;

/// Failures reported by graph construction and by the algorithm
/// engines. All of them are detected synchronously and are
/// reproducible for the same input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint or a source/start argument lies outside
    /// `[0, vertex_count)`.
    #[error("vertex index {index} out of range for a graph with {vertex_count} vertices")]
    InvalidVertexIndex { index: usize, vertex_count: usize },

    /// The weight of edge `(from, to)` is not comparable (e.g. NaN).
    #[error("edge ({from}, {to}) has a weight that cannot be ordered")]
    InvalidWeight { from: usize, to: usize },

    /// An engine that requires non-negative weights found a negative
    /// edge during its pre-scan.
    #[error("{algorithm} requires non-negative weights, but edge ({from}, {to}) has weight {weight}")]
    NegativeWeight {
        algorithm: &'static str,
        from: usize,
        to: usize,
        weight: String,
    },

    /// Bellman-Ford found a cycle of negative total weight reachable
    /// from `origin`.
    #[error("negative cycle reachable from vertex {origin}")]
    NegativeCycle { origin: usize },

    /// Extending a path along edge `(from, to)` produced a length the
    /// weight type cannot represent.
    #[error("path length through edge ({from}, {to}) overflows the weight type")]
    WeightOverflow { from: usize, to: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures while reading a graph from an external source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl LoadError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
