//! Pure string nodes.

use flowgraph::{DataType, NodeInstance};
use flowscript::{NodeDefinition, NodeKind, NodeRegistry};

pub fn register(registry: &mut NodeRegistry) {
    registry.register(
        NodeDefinition::new("concat", NodeKind::Function)
            .pure()
            .library("System.Text")
            .data_input("a", DataType::String)
            .data_input("b", DataType::String)
            .data_output("result", DataType::String)
            .emission(|_: &NodeInstance, args: &[String], outs: &[String]| {
                format!(
                    "var {} = new StringBuilder().Append({}).Append({}).ToString();",
                    outs[0], args[0], args[1]
                )
            }),
    );

    registry.register(
        NodeDefinition::new("int_to_string", NodeKind::Function)
            .pure()
            .data_input("value", DataType::Integer)
            .data_output("result", DataType::String)
            .emission(|_: &NodeInstance, args: &[String], outs: &[String]| {
                format!("var {} = {}.ToString();", outs[0], args[0])
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgraph::NodeId;

    #[test]
    fn concat_declares_its_library() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);
        assert_eq!(
            registry.definition("concat").unwrap().library.as_deref(),
            Some("System.Text")
        );
    }

    #[test]
    fn int_to_string_emission() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        let node = registry.instantiate(NodeId(4), "int_to_string").unwrap();
        let text = registry
            .definition("int_to_string")
            .unwrap()
            .emit_code()
            .unwrap()
            .emit(&node, &["count1".to_string()], &["text2".to_string()]);
        assert_eq!(text, "var text2 = count1.ToString();");
    }
}
