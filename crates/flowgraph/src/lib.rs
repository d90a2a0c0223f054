//! Graph description model for flowscript.
//!
//! A graph is a set of nodes with named input/output pins, wired together by
//! directed connections. Connections are either *sequence* edges (control
//! flow, statement order) or *data* edges (value flow into an input pin).
//! Inputs without an incoming data edge may instead carry a constant value.
//!
//! The compiler only ever reads this model: adjacency lookups, constant
//! lookups and node resolution. Anything that mutates a graph during a
//! compilation pass is the embedding application's bug to prevent.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a node within one graph.
///
/// Nodes are keyed by integer id in a `BTreeMap`, so every iteration over a
/// graph is in id order and compilation output is reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDescription {
    pub name: String,
    pub nodes: BTreeMap<NodeId, NodeInstance>,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInstance {
    pub id: NodeId,
    /// Registry key of the node's definition (e.g. `"add"`, `"branch"`).
    pub node_type: String,
    pub inputs: Vec<Pin>,
    pub outputs: Vec<Pin>,
    /// Constant values bound to unconnected input pins, by pin name.
    #[serde(default)]
    pub constants: HashMap<String, ConstantValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub name: String,
    pub data_type: DataType,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Control flow. Pins of this type carry no value.
    Sequence,
    Boolean,
    Integer,
    Float,
    Double,
    String,
    Object,
    /// Matches any data type (reroute-style pins).
    Any,
}

impl DataType {
    pub fn is_sequence(&self) -> bool {
        matches!(self, DataType::Sequence)
    }
}

/// A literal bound to an unconnected input pin.
///
/// `Float` and `Double` are distinct variants because the generated text
/// suffixes single-precision literals and leaves double-precision plain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstantValue {
    Boolean(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    String(String),
    Null,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub source_node: NodeId,
    pub source_pin: String,
    pub target_node: NodeId,
    pub target_pin: String,
    pub connection_type: ConnectionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    Sequence,
    Data,
}

#[derive(Debug, Clone, Error)]
pub enum GraphError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("node {node} has no {direction} pin named '{pin}'")]
    UnknownPin {
        node: NodeId,
        pin: String,
        direction: &'static str,
    },
}

impl GraphDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeMap::new(),
            connections: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: NodeInstance) {
        self.nodes.insert(node.id, node);
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeInstance> {
        self.nodes.get(&id)
    }

    /// Wire a sequence edge from `(source, source_pin)` to `(target, target_pin)`.
    ///
    /// Both endpoints must exist and name pins of the matching direction.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_pin: &str,
        target: NodeId,
        target_pin: &str,
    ) -> Result<(), GraphError> {
        self.add_connection(source, source_pin, target, target_pin, ConnectionType::Sequence)
    }

    /// Wire a data edge from `(source, source_pin)` to `(target, target_pin)`.
    pub fn connect_data(
        &mut self,
        source: NodeId,
        source_pin: &str,
        target: NodeId,
        target_pin: &str,
    ) -> Result<(), GraphError> {
        self.add_connection(source, source_pin, target, target_pin, ConnectionType::Data)
    }

    fn add_connection(
        &mut self,
        source: NodeId,
        source_pin: &str,
        target: NodeId,
        target_pin: &str,
        connection_type: ConnectionType,
    ) -> Result<(), GraphError> {
        let source_node = self.node(source).ok_or(GraphError::UnknownNode(source))?;
        if source_node.output(source_pin).is_none() {
            return Err(GraphError::UnknownPin {
                node: source,
                pin: source_pin.to_string(),
                direction: "output",
            });
        }
        let target_node = self.node(target).ok_or(GraphError::UnknownNode(target))?;
        if target_node.input(target_pin).is_none() {
            return Err(GraphError::UnknownPin {
                node: target,
                pin: target_pin.to_string(),
                direction: "input",
            });
        }

        self.connections.push(Connection {
            source_node: source,
            source_pin: source_pin.to_string(),
            target_node: target,
            target_pin: target_pin.to_string(),
            connection_type,
        });
        Ok(())
    }

    /// The outgoing sequence connection from `(node, output_pin)`, if any.
    ///
    /// Sequence outputs have no fan-out; the first match is the only match.
    pub fn sequence_target(&self, node: NodeId, output_pin: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| {
            c.connection_type == ConnectionType::Sequence
                && c.source_node == node
                && c.source_pin == output_pin
        })
    }

    /// The single incoming data connection into `(node, input_pin)`, if any.
    pub fn data_source(&self, node: NodeId, input_pin: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| {
            c.connection_type == ConnectionType::Data
                && c.target_node == node
                && c.target_pin == input_pin
        })
    }

    /// The constant bound to `(node, input_pin)`, if one exists.
    pub fn constant(&self, node: NodeId, input_pin: &str) -> Option<&ConstantValue> {
        self.nodes.get(&node).and_then(|n| n.constants.get(input_pin))
    }

    /// All nodes with the given definition key, in id order.
    pub fn nodes_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a NodeInstance> {
        self.nodes.values().filter(move |n| n.node_type == node_type)
    }
}

impl NodeInstance {
    pub fn new(id: NodeId, node_type: impl Into<String>) -> Self {
        Self {
            id,
            node_type: node_type.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            constants: HashMap::new(),
        }
    }

    pub fn add_input_pin(&mut self, name: &str, data_type: DataType) {
        self.inputs.push(Pin {
            name: name.to_string(),
            data_type,
            optional: false,
        });
    }

    pub fn add_output_pin(&mut self, name: &str, data_type: DataType) {
        self.outputs.push(Pin {
            name: name.to_string(),
            data_type,
            optional: false,
        });
    }

    pub fn set_constant(&mut self, input_pin: &str, value: ConstantValue) {
        self.constants.insert(input_pin.to_string(), value);
    }

    pub fn input(&self, name: &str) -> Option<&Pin> {
        self.inputs.iter().find(|p| p.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&Pin> {
        self.outputs.iter().find(|p| p.name == name)
    }

    /// Input pins that carry values, in declaration order.
    pub fn data_inputs(&self) -> impl Iterator<Item = &Pin> {
        self.inputs.iter().filter(|p| !p.data_type.is_sequence())
    }

    /// Output pins that carry values, in declaration order.
    pub fn data_outputs(&self) -> impl Iterator<Item = &Pin> {
        self.outputs.iter().filter(|p| !p.data_type.is_sequence())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_graph() -> GraphDescription {
        let mut graph = GraphDescription::new("adjacency");

        let mut start = NodeInstance::new(NodeId(1), "start");
        start.add_output_pin("body", DataType::Sequence);
        graph.add_node(start);

        let mut print = NodeInstance::new(NodeId(2), "print");
        print.add_input_pin("exec", DataType::Sequence);
        print.add_input_pin("message", DataType::String);
        print.add_output_pin("then", DataType::Sequence);
        print.set_constant("message", ConstantValue::String("hi".into()));
        graph.add_node(print);

        graph.connect(NodeId(1), "body", NodeId(2), "exec").unwrap();
        graph
    }

    #[test]
    fn sequence_adjacency() {
        let graph = two_node_graph();

        let conn = graph.sequence_target(NodeId(1), "body").expect("edge");
        assert_eq!(conn.target_node, NodeId(2));
        assert_eq!(conn.target_pin, "exec");

        assert!(graph.sequence_target(NodeId(2), "then").is_none());
    }

    #[test]
    fn constant_lookup() {
        let graph = two_node_graph();

        assert_eq!(
            graph.constant(NodeId(2), "message"),
            Some(&ConstantValue::String("hi".into()))
        );
        assert!(graph.constant(NodeId(2), "exec").is_none());
    }

    #[test]
    fn connect_rejects_unknown_endpoints() {
        let mut graph = two_node_graph();

        let err = graph.connect(NodeId(1), "body", NodeId(9), "exec").unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode(NodeId(9))));

        let err = graph.connect(NodeId(1), "nope", NodeId(2), "exec").unwrap_err();
        assert!(matches!(err, GraphError::UnknownPin { .. }));
    }

    #[test]
    fn data_source_ignores_sequence_edges() {
        let mut graph = two_node_graph();

        let mut concat = NodeInstance::new(NodeId(3), "concat");
        concat.add_output_pin("result", DataType::String);
        graph.add_node(concat);
        graph
            .connect_data(NodeId(3), "result", NodeId(2), "message")
            .unwrap();

        let conn = graph.data_source(NodeId(2), "message").expect("edge");
        assert_eq!(conn.source_node, NodeId(3));
        assert!(graph.data_source(NodeId(2), "exec").is_none());
    }

    #[test]
    fn json_round_trip() {
        let graph = two_node_graph();

        let json = serde_json::to_string(&graph).unwrap();
        let back: GraphDescription = serde_json::from_str(&json).unwrap();

        assert_eq!(back.nodes.len(), 2);
        assert_eq!(back.connections.len(), 1);
        assert_eq!(back.node(NodeId(2)).unwrap().node_type, "print");
    }

    #[test]
    fn nodes_of_type_filters_in_id_order() {
        let mut graph = two_node_graph();
        let mut start = NodeInstance::new(NodeId(7), "start");
        start.add_output_pin("body", DataType::Sequence);
        graph.add_node(start);

        let ids: Vec<NodeId> = graph.nodes_of_type("start").map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(7)]);
        assert_eq!(graph.nodes_of_type("branch").count(), 0);
    }

    #[test]
    fn nodes_iterate_in_id_order() {
        let mut graph = GraphDescription::new("ordering");
        for id in [7u64, 2, 5] {
            graph.add_node(NodeInstance::new(NodeId(id), "comment"));
        }

        let ids: Vec<u64> = graph.nodes.keys().map(|id| id.0).collect();
        assert_eq!(ids, vec![2, 5, 7]);
    }
}
