//! # The flowscript compiler
//!
//! Compiles a visual node graph, a mix of sequence (control flow) and
//! data (value flow) edges between typed nodes, into linear, scoped
//! procedural source text.
//!
//! The compiler never executes a graph and never mutates one; it walks the
//! sequence chain from each path root, materializes pure data dependencies
//! on demand, and funnels everything through an indentation-aware emitter
//! into a single generated document: a deduplicated import list, a
//! namespace and class shell, generated functions, and one entry procedure
//! per entry node.
//!
//! ```rust,ignore
//! use flowscript::{compile_graph, NodeRegistry};
//! use flowgraph::GraphDescription;
//!
//! let registry: NodeRegistry = /* node definitions */;
//! let graph: GraphDescription = /* from the editor */;
//! let source = compile_graph(&graph, &registry)?;
//! ```

// ================================================================================================
// Public API - Core compilation entry points
// ================================================================================================

pub mod compiler;

pub use compiler::{compile_graph, CompileStats, CompiledScript, Compiler};

// ================================================================================================
// Building blocks
// ================================================================================================

/// Indentation-tracking text buffer.
pub mod emitter;

/// Variable allocation and the scoped binding cache.
pub mod binder;

/// Node definitions, kinds and the code-emission capability.
pub mod registry;

/// Code generation strategies.
pub mod generation;

/// Compilation error kinds.
pub mod error;

/// Compilation options.
pub mod options;

/// Advisory pre-compile checks.
pub mod validation;

pub use binder::VariableBinder;
pub use emitter::CodeEmitter;
pub use error::CompileError;
pub use generation::{format_constant, ArgumentToken, CodeGenerator, PLACEHOLDER_TOKEN};
pub use options::{CompileOptions, IndentStyle, UnresolvedPolicy};
pub use registry::{EmitCode, NodeDefinition, NodeKind, NodeRegistry};
pub use validation::{validate_graph, ValidationIssue};
