//! # Code Generation
//!
//! Transforms a node graph into procedural source text.
//!
//! The generator uses different strategies for different node kinds:
//!
//! - **Call-style nodes** (`function_nodes.rs`): library calls, graph
//!   function calls and returns become sequential statements along the
//!   sequence chain.
//! - **Pure nodes** (`pure_nodes.rs`): resolved on demand. A pure
//!   producer is materialized the first time a control-flow-ordered node
//!   needs one of its outputs, inside a pure scope whose temporaries are
//!   discarded when the scope closes. There is no topological pre-pass;
//!   the walker discovers pure work lazily, so only referenced pure nodes
//!   are evaluated.
//! - **Control flow** (`control_flow_nodes.rs`): the two-way branch is
//!   the only generically supported fork; each arm is walked into its own
//!   child emitter and spliced back.
//! - **Path roots** (`event_nodes.rs`): entry nodes become entry
//!   procedures, function-definition nodes become generated methods.
//!
//! All strategies funnel text through [`crate::emitter::CodeEmitter`] and
//! share one [`CodeGenerator`] carrying the binder, the import set and the
//! pass counters.

pub mod code_generator;
pub mod control_flow_nodes;
pub mod event_nodes;
pub mod function_nodes;
pub mod imports;
pub mod literals;
pub mod pure_nodes;

pub use code_generator::CodeGenerator;
pub use imports::ImportSet;
pub use literals::{csharp_type, format_constant};
pub use pure_nodes::{ArgumentToken, PLACEHOLDER_TOKEN};
