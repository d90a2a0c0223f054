//! # Node Registry
//!
//! Node definitions and the code-emission capability.
//!
//! A node's runtime behavior is described by its [`NodeDefinition`]: a
//! closed [`NodeKind`] that drives dispatch, declared pins, an optional
//! library membership (accumulated into the generated import list), a
//! purity marker, and an optional [`EmitCode`] capability. Dispatch is
//! exhaustive pattern matching over `NodeKind`, so a kind without handling
//! is a compile-time-visible gap rather than a runtime surprise.
//!
//! The registry is an explicitly constructed object passed into the
//! compiler; there is no process-wide singleton.

use std::collections::HashMap;

use flowgraph::{DataType, NodeId, NodeInstance, Pin};

use crate::error::CompileError;

/// Closed set of node kinds the compiler dispatches over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Program entry point; root of one emitted entry procedure.
    Entry,
    /// Ordinary computation, usually library-backed. Pure definitions of
    /// this kind are evaluated on demand; impure ones sit on the sequence
    /// path.
    Function,
    /// Two-way control-flow fork.
    Branch,
    /// Multi-exit loop construct. Declared limitation: no generic handling
    /// exists, and compilation fails naming the offending type.
    Loop,
    /// Call of a graph-defined function.
    FunctionCall,
    /// Return from a graph-defined function.
    FunctionReturn,
    /// Root of one emitted function body.
    FunctionDefinition,
    /// No particular shape; emits through its capability if it has one,
    /// as an empty placeholder block otherwise.
    Generic,
}

/// Code-emission capability, implemented per node kind.
///
/// Given the node instance, one rendered argument token per declared data
/// input and one fresh variable name per declared data output, returns a
/// block of target-language text that computes the outputs into variables
/// of exactly those names when spliced into the surrounding scope.
pub trait EmitCode: Send + Sync {
    fn emit(&self, node: &NodeInstance, args: &[String], outputs: &[String]) -> String;
}

impl<F> EmitCode for F
where
    F: Fn(&NodeInstance, &[String], &[String]) -> String + Send + Sync,
{
    fn emit(&self, node: &NodeInstance, args: &[String], outputs: &[String]) -> String {
        self(node, args, outputs)
    }
}

pub struct NodeDefinition {
    pub name: String,
    pub kind: NodeKind,
    /// Library/namespace membership; recorded into the import list when a
    /// node of this definition is emitted.
    pub library: Option<String>,
    /// Pure nodes have no required position in the control-flow order and
    /// may be evaluated on demand. Everything else must be reached through
    /// a sequence edge before its outputs can be read.
    pub pure: bool,
    pub inputs: Vec<Pin>,
    pub outputs: Vec<Pin>,
    emission: Option<Box<dyn EmitCode>>,
}

impl std::fmt::Debug for NodeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("library", &self.library)
            .field("pure", &self.pure)
            .field("emission", &self.emission.is_some())
            .finish()
    }
}

impl NodeDefinition {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            library: None,
            pure: false,
            inputs: Vec::new(),
            outputs: Vec::new(),
            emission: None,
        }
    }

    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    pub fn pure(mut self) -> Self {
        self.pure = true;
        self
    }

    pub fn sequence_input(mut self, name: &str) -> Self {
        self.inputs.push(Pin {
            name: name.to_string(),
            data_type: DataType::Sequence,
            optional: false,
        });
        self
    }

    pub fn sequence_output(mut self, name: &str) -> Self {
        self.outputs.push(Pin {
            name: name.to_string(),
            data_type: DataType::Sequence,
            optional: false,
        });
        self
    }

    pub fn data_input(mut self, name: &str, data_type: DataType) -> Self {
        self.inputs.push(Pin {
            name: name.to_string(),
            data_type,
            optional: false,
        });
        self
    }

    /// A data input the resolver may silently degrade to the placeholder
    /// token when it cannot be resolved.
    pub fn optional_input(mut self, name: &str, data_type: DataType) -> Self {
        self.inputs.push(Pin {
            name: name.to_string(),
            data_type,
            optional: true,
        });
        self
    }

    pub fn data_output(mut self, name: &str, data_type: DataType) -> Self {
        self.outputs.push(Pin {
            name: name.to_string(),
            data_type,
            optional: false,
        });
        self
    }

    pub fn emission(mut self, emission: impl EmitCode + 'static) -> Self {
        self.emission = Some(Box::new(emission));
        self
    }

    pub fn emit_code(&self) -> Option<&dyn EmitCode> {
        self.emission.as_deref()
    }
}

#[derive(Default)]
pub struct NodeRegistry {
    definitions: HashMap<String, NodeDefinition>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: NodeDefinition) {
        self.definitions
            .insert(definition.name.clone(), definition);
    }

    pub fn definition(&self, node_type: &str) -> Option<&NodeDefinition> {
        self.definitions.get(node_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Stamp a [`NodeInstance`] with the definition's declared pins.
    pub fn instantiate(&self, id: NodeId, node_type: &str) -> Result<NodeInstance, CompileError> {
        let definition =
            self.definition(node_type)
                .ok_or_else(|| CompileError::UnknownNodeType {
                    node: id,
                    node_type: node_type.to_string(),
                })?;

        let mut node = NodeInstance::new(id, node_type);
        node.inputs = definition.inputs.clone();
        node.outputs = definition.outputs.clone();
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        registry.register(
            NodeDefinition::new("add", NodeKind::Function)
                .pure()
                .data_input("a", DataType::Integer)
                .data_input("b", DataType::Integer)
                .data_output("result", DataType::Integer)
                .emission(|_: &NodeInstance, args: &[String], outs: &[String]| {
                    format!("var {} = {} + {};", outs[0], args[0], args[1])
                }),
        );
        registry
    }

    #[test]
    fn instantiate_stamps_declared_pins() {
        let registry = sample_registry();
        let node = registry.instantiate(NodeId(1), "add").unwrap();

        assert_eq!(node.inputs.len(), 2);
        assert_eq!(node.outputs.len(), 1);
        assert_eq!(node.data_inputs().count(), 2);
    }

    #[test]
    fn instantiate_unknown_type_fails() {
        let registry = sample_registry();
        let err = registry.instantiate(NodeId(1), "subtract").unwrap_err();
        assert!(matches!(err, CompileError::UnknownNodeType { .. }));
    }

    #[test]
    fn emission_capability_renders_text() {
        let registry = sample_registry();
        let node = registry.instantiate(NodeId(1), "add").unwrap();
        let definition = registry.definition("add").unwrap();

        let text = definition.emit_code().unwrap().emit(
            &node,
            &["2".to_string(), "3".to_string()],
            &["sum1".to_string()],
        );
        assert_eq!(text, "var sum1 = 2 + 3;");
    }
}
