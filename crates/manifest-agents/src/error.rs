//! Error types for the manifest-agents crate.
//!
//! Agent operations themselves never fail: absence of signal degrades to
//! defaults. The only errors here describe defects in a hand-authored
//! catalog, caught by [`validate_graph`](crate::graph::validate_graph).

/// A structural defect in a causal graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two nodes share an id.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// A node depends on an id that is not in the graph.
    #[error("node {node} depends on unknown node {dependency}")]
    UnknownDependency {
        /// The node holding the dangling edge.
        node: String,
        /// The id that could not be resolved.
        dependency: String,
    },

    /// A node transitively depends on itself.
    #[error("dependency cycle through node {0}")]
    Cycle(String),
}
