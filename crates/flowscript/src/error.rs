//! Compilation error kinds.
//!
//! Every failure carries enough context (node id, pin name, node type) to
//! locate the offending graph element. Callers pick abort-vs-placeholder
//! policy per input resolution through [`CompileOptions`], not by catching
//! and rethrowing.
//!
//! [`CompileOptions`]: crate::options::CompileOptions

use flowgraph::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CompileError {
    /// The graph references something that does not exist: a dangling
    /// connection target, or a path root reached mid-sequence. Structural
    /// corruption of the input graph, never recoverable.
    #[error("structural error at node {node}: {detail}")]
    Structural { node: NodeId, detail: String },

    /// A node's definition key is not present in the registry.
    #[error("unknown node type '{node_type}' (node {node})")]
    UnknownNodeType { node: NodeId, node_type: String },

    /// A control-flow node kind with no generic handling. Each such kind
    /// needs bespoke per-kind emission and must be added explicitly.
    #[error("unsupported control-flow node '{node_type}' (node {node})")]
    UnsupportedConstruct { node: NodeId, node_type: String },

    /// A fork node with other than exactly one data input.
    #[error("branch node {node} requires exactly one data input, found {found}")]
    Arity { node: NodeId, found: usize },

    /// An input with no connection, no constant and no resolvable pure
    /// upstream value.
    #[error("unresolved input '{input}' on node {node}: {reason}")]
    UnresolvedInput {
        node: NodeId,
        input: String,
        reason: String,
    },

    /// Unbalanced block close in the emitter. Cannot occur if dispatch
    /// logic is correct; surfaced loudly instead of clamped.
    #[error("unbalanced block close in generated code")]
    EmitterMisuse,

    /// The graph contains neither entry nodes nor function definitions.
    #[error("no entry or function definition nodes in graph '{graph}'")]
    NoEntryPoints { graph: String },
}
