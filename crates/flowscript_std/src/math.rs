//! Pure arithmetic and comparison nodes.
//!
//! All of these are declared pure: they have no sequence pins and are
//! materialized on demand where their outputs are consumed.

use flowgraph::{DataType, NodeInstance};
use flowscript::{NodeDefinition, NodeKind, NodeRegistry};

fn binary_op(name: &str, operator: &'static str, result: DataType) -> NodeDefinition {
    NodeDefinition::new(name, NodeKind::Function)
        .pure()
        .data_input("a", DataType::Integer)
        .data_input("b", DataType::Integer)
        .data_output("result", result)
        .emission(move |_: &NodeInstance, args: &[String], outs: &[String]| {
            format!("var {} = {} {} {};", outs[0], args[0], operator, args[1])
        })
}

pub fn register(registry: &mut NodeRegistry) {
    registry.register(binary_op("add", "+", DataType::Integer));
    registry.register(binary_op("multiply", "*", DataType::Integer));
    registry.register(binary_op("greater_than", ">", DataType::Boolean));
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgraph::NodeId;

    #[test]
    fn add_emits_an_infix_expression() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        let node = registry.instantiate(NodeId(1), "add").unwrap();
        let definition = registry.definition("add").unwrap();
        let text = definition.emit_code().unwrap().emit(
            &node,
            &["2".to_string(), "3".to_string()],
            &["result1".to_string()],
        );
        assert_eq!(text, "var result1 = 2 + 3;");
    }

    #[test]
    fn math_nodes_are_pure_and_pinless_in_sequence() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        for name in ["add", "multiply", "greater_than"] {
            let definition = registry.definition(name).unwrap();
            assert!(definition.pure, "{} must be pure", name);
            assert!(definition
                .inputs
                .iter()
                .chain(&definition.outputs)
                .all(|p| !p.data_type.is_sequence()));
        }
    }
}
