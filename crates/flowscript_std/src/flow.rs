//! Control-flow nodes: entry point, branch, loop, comment.

use flowgraph::DataType;
use flowscript::{NodeDefinition, NodeKind, NodeRegistry};

pub fn register(registry: &mut NodeRegistry) {
    // Program entry point. The compiler emits one entry procedure per
    // instance; the node itself produces no text.
    registry.register(NodeDefinition::new("start", NodeKind::Entry).sequence_output("body"));

    // Two-way fork on a boolean condition. Emission is handled by the
    // compiler's branch strategy, not by a capability.
    registry.register(
        NodeDefinition::new("branch", NodeKind::Branch)
            .sequence_input("exec")
            .data_input("condition", DataType::Boolean)
            .sequence_output("True")
            .sequence_output("False"),
    );

    // Multi-exit loop. No generic handling exists; compiling a graph that
    // reaches one fails with an unsupported-construct error.
    registry.register(
        NodeDefinition::new("while_loop", NodeKind::Loop)
            .sequence_input("exec")
            .data_input("condition", DataType::Boolean)
            .sequence_output("Body")
            .sequence_output("Done"),
    );

    // Structural marker with no code emission; the compiler keeps an empty
    // placeholder block in the output.
    registry.register(
        NodeDefinition::new("comment", NodeKind::Generic)
            .sequence_input("exec")
            .sequence_output("then"),
    );
}
