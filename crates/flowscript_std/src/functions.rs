//! Graph-defined functions: definition, call and return nodes.
//!
//! A `function_def` instance names its function through a `name` constant
//! and declares its parameters as data output pins added per instance; the
//! compiler's path-root strategy turns each definition into a generated
//! method. `function_call` names its callee through a `function` constant
//! and declares argument inputs and result outputs per instance.

use flowgraph::{ConstantValue, DataType, NodeInstance};
use flowscript::{NodeDefinition, NodeKind, NodeRegistry, PLACEHOLDER_TOKEN};

pub fn register(registry: &mut NodeRegistry) {
    registry.register(NodeDefinition::new("function_def", NodeKind::FunctionDefinition)
        .sequence_output("body"));

    registry.register(
        NodeDefinition::new("function_call", NodeKind::FunctionCall)
            .sequence_input("exec")
            .sequence_output("then")
            .emission(|node: &NodeInstance, args: &[String], outs: &[String]| {
                let name = match node.constants.get("function") {
                    Some(ConstantValue::String(name)) if !name.is_empty() => name.clone(),
                    _ => format!("Function{}", node.id.0),
                };
                let call = format!("{}({})", name, args.join(", "));
                match outs.first() {
                    Some(out) => format!("var {} = {};", out, call),
                    None => format!("{};", call),
                }
            }),
    );

    registry.register(
        NodeDefinition::new("function_return", NodeKind::FunctionReturn)
            .sequence_input("exec")
            .optional_input("value", DataType::Any)
            .emission(|_: &NodeInstance, args: &[String], _: &[String]| {
                match args.first() {
                    Some(value) if value != PLACEHOLDER_TOKEN => format!("return {};", value),
                    _ => "return;".to_string(),
                }
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowgraph::NodeId;

    #[test]
    fn call_uses_the_function_constant() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        let mut node = registry.instantiate(NodeId(5), "function_call").unwrap();
        node.set_constant("function", ConstantValue::String("Damage".into()));

        let text = registry
            .definition("function_call")
            .unwrap()
            .emit_code()
            .unwrap()
            .emit(&node, &["7".to_string()], &[]);
        assert_eq!(text, "Damage(7);");
    }

    #[test]
    fn call_with_result_binds_a_variable() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        let node = registry.instantiate(NodeId(6), "function_call").unwrap();
        let text = registry
            .definition("function_call")
            .unwrap()
            .emit_code()
            .unwrap()
            .emit(&node, &[], &["result1".to_string()]);
        assert_eq!(text, "var result1 = Function6();");
    }

    #[test]
    fn return_degrades_to_bare_return() {
        let mut registry = NodeRegistry::new();
        register(&mut registry);

        let node = registry.instantiate(NodeId(7), "function_return").unwrap();
        let emission = registry
            .definition("function_return")
            .unwrap()
            .emit_code()
            .unwrap();

        assert_eq!(
            emission.emit(&node, &[PLACEHOLDER_TOKEN.to_string()], &[]),
            "return;"
        );
        assert_eq!(emission.emit(&node, &["x1".to_string()], &[]), "return x1;");
    }
}
