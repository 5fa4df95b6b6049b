use thiserror::Error;

/// Errors surfaced by graph queries and bulk loads.
///
/// Lookups that can legitimately miss (`neighbors_of`, `degree_counts`)
/// return `Option` instead; these variants are reserved for precondition
/// violations and malformed input.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A traversal was started from a vertex that is not in the vertex set.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// The operation divides by `order - 1` and the graph is too small.
    #[error("degenerate graph: operation requires at least 2 vertices, graph has {order}")]
    DegenerateGraph { order: usize },

    /// A JSON adjacency or edge-list description could not be parsed.
    #[error("invalid graph description: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn unknown<V: std::fmt::Debug>(vertex: &V) -> Self {
        GraphError::UnknownVertex(format!("{:?}", vertex))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
