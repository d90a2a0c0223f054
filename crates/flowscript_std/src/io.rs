//! Console output and other side-effecting nodes.

use flowgraph::{DataType, NodeInstance};
use flowscript::{NodeDefinition, NodeKind, NodeRegistry};

pub fn register(registry: &mut NodeRegistry) {
    // Print a message to the console. Side effect, so it sits on the
    // sequence path.
    registry.register(
        NodeDefinition::new("print", NodeKind::Function)
            .library("System")
            .sequence_input("exec")
            .data_input("message", DataType::String)
            .sequence_output("then")
            .emission(|_: &NodeInstance, args: &[String], _: &[String]| {
                format!("Console.WriteLine({});", args[0])
            }),
    );

    // Impure producer: yields a value but must execute in sequence order.
    registry.register(
        NodeDefinition::new("random_int", NodeKind::Function)
            .library("System")
            .sequence_input("exec")
            .data_output("value", DataType::Integer)
            .sequence_output("then")
            .emission(|_: &NodeInstance, _: &[String], outs: &[String]| {
                format!("var {} = Random.Shared.Next();", outs[0])
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgraph::NodeId;

    #[test]
    fn print_emission() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        let node = registry.instantiate(NodeId(9), "print").unwrap();
        let text = registry
            .definition("print")
            .unwrap()
            .emit_code()
            .unwrap()
            .emit(&node, &["\"hi\"".to_string()], &[]);
        assert_eq!(text, "Console.WriteLine(\"hi\");");
    }

    #[test]
    fn random_int_is_not_pure() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);
        assert!(!registry.definition("random_int").unwrap().pure);
    }
}
