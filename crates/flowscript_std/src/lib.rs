//! Standard node library for the flowscript compiler.
//!
//! Every definition here is ordinary registry data; embedding applications
//! can extend the registry with their own definitions or replace it
//! entirely. Nodes are grouped by category, one module per category.

use flowscript::NodeRegistry;

pub mod flow;
pub mod functions;
pub mod io;
pub mod math;
pub mod strings;

/// Build a registry containing every standard node definition.
pub fn standard_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    flow::register(&mut registry);
    math::register(&mut registry);
    strings::register(&mut registry);
    io::register(&mut registry);
    functions::register(&mut registry);
    registry
}
