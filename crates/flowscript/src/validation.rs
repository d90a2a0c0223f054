//! Pre-compile graph validation.
//!
//! Advisory structural checks an editor can surface before invoking the
//! compiler. The compile path independently re-detects the fatal cases as
//! [`CompileError`]s; nothing here mutates or gates compilation.
//!
//! [`CompileError`]: crate::error::CompileError

use flowgraph::{ConnectionType, GraphDescription, NodeId};
use itertools::Itertools;

use crate::registry::{NodeKind, NodeRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub node: Option<NodeId>,
    pub message: String,
}

impl ValidationIssue {
    fn at(node: NodeId, message: impl Into<String>) -> Self {
        Self {
            node: Some(node),
            message: message.into(),
        }
    }

    fn graph(message: impl Into<String>) -> Self {
        Self {
            node: None,
            message: message.into(),
        }
    }
}

pub fn validate_graph(graph: &GraphDescription, registry: &NodeRegistry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for connection in &graph.connections {
        match graph.node(connection.source_node) {
            None => issues.push(ValidationIssue::at(
                connection.source_node,
                "connection source node does not exist",
            )),
            Some(source) => {
                if source.output(&connection.source_pin).is_none() {
                    issues.push(ValidationIssue::at(
                        connection.source_node,
                        format!("no output pin '{}'", connection.source_pin),
                    ));
                }
            }
        }
        match graph.node(connection.target_node) {
            None => issues.push(ValidationIssue::at(
                connection.target_node,
                "connection target node does not exist",
            )),
            Some(target) => {
                if target.input(&connection.target_pin).is_none() {
                    issues.push(ValidationIssue::at(
                        connection.target_node,
                        format!("no input pin '{}'", connection.target_pin),
                    ));
                }
            }
        }
    }

    // A data input has exactly one producer.
    for (node, pin) in graph
        .connections
        .iter()
        .filter(|c| c.connection_type == ConnectionType::Data)
        .map(|c| (c.target_node, c.target_pin.as_str()))
        .duplicates()
    {
        issues.push(ValidationIssue::at(
            node,
            format!("input '{}' has more than one incoming data connection", pin),
        ));
    }

    let mut roots = 0usize;
    for node in graph.nodes.values() {
        match registry.definition(&node.node_type) {
            None => issues.push(ValidationIssue::at(
                node.id,
                format!("unknown node type '{}'", node.node_type),
            )),
            Some(definition) => match definition.kind {
                NodeKind::Entry | NodeKind::FunctionDefinition => roots += 1,
                NodeKind::Branch => {
                    let found = node.data_inputs().count();
                    if found != 1 {
                        issues.push(ValidationIssue::at(
                            node.id,
                            format!("branch requires exactly one data input, found {}", found),
                        ));
                    }
                }
                _ => {}
            },
        }
    }
    if roots == 0 {
        issues.push(ValidationIssue::graph(
            "graph has no entry or function definition nodes",
        ));
    }

    issues
}
