//! # Node Dispatch and Path Walking
//!
//! [`CodeGenerator`] carries the per-pass mutable state (variable binder,
//! import set, counters) and walks the sequence chain, dispatching each
//! node to the strategy its kind requires. The strategy implementations
//! live in the sibling modules and extend this type with further `impl`
//! blocks.

use flowgraph::{Connection, GraphDescription, NodeId, NodeInstance};
use tracing::{debug, trace};

use crate::binder::VariableBinder;
use crate::emitter::CodeEmitter;
use crate::error::CompileError;
use crate::generation::imports::ImportSet;
use crate::options::CompileOptions;
use crate::registry::{NodeDefinition, NodeKind, NodeRegistry};

pub struct CodeGenerator<'a> {
    pub(crate) graph: &'a GraphDescription,
    registry: &'a NodeRegistry,
    pub(crate) options: &'a CompileOptions,
    pub(crate) binder: VariableBinder,
    pub(crate) imports: ImportSet,
    /// Nodes emitted along sequence paths.
    pub(crate) dispatched: usize,
    /// Pure producers materialized on demand.
    pub(crate) pure_evaluations: usize,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(
        graph: &'a GraphDescription,
        registry: &'a NodeRegistry,
        options: &'a CompileOptions,
    ) -> Self {
        Self {
            graph,
            registry,
            options,
            binder: VariableBinder::new(),
            imports: ImportSet::new(),
            dispatched: 0,
            pure_evaluations: 0,
        }
    }

    /// Follow a sequence chain until no further sequence edge exists.
    ///
    /// Returns the last visited node. A connection whose destination does
    /// not resolve is structural corruption of the input graph and aborts
    /// the pass.
    pub fn walk_path(
        &mut self,
        start: &'a Connection,
        emitter: &mut CodeEmitter,
    ) -> Result<NodeId, CompileError> {
        let mut connection = start;
        loop {
            let node = self.destination(connection)?;
            match self.emit_node(node, emitter)? {
                Some(next) => connection = next,
                None => {
                    trace!(node = %node.id, "sequence path terminated");
                    return Ok(node.id);
                }
            }
        }
    }

    /// Walk a sequence chain into a child emitter seeded at the current
    /// depth, splicing the text back on success.
    pub(crate) fn walk_spliced(
        &mut self,
        start: &'a Connection,
        emitter: &mut CodeEmitter,
    ) -> Result<NodeId, CompileError> {
        let mut inner = emitter.child();
        let last = self.walk_path(start, &mut inner)?;
        emitter.splice(inner);
        Ok(last)
    }

    /// Drop every binding between generated members. One member's locals
    /// are never visible from the next; the name counter is untouched, so
    /// names stay unique across the whole document.
    pub(crate) fn clear_member_bindings(&mut self) {
        self.binder.clear_bindings();
    }

    /// Emit one node and report the next sequence connection, if any.
    pub(crate) fn emit_node(
        &mut self,
        node: &'a NodeInstance,
        emitter: &mut CodeEmitter,
    ) -> Result<Option<&'a Connection>, CompileError> {
        let definition = self.definition_for(node)?;
        debug!(node = %node.id, node_type = %node.node_type, kind = ?definition.kind, "dispatching");
        self.dispatched += 1;

        if self.options.comments {
            emitter.comment(&provenance(node, definition));
        }

        match definition.kind {
            NodeKind::Branch => {
                self.emit_branch(node, emitter)?;
                // The branch emitter completes both arms itself.
                Ok(None)
            }
            NodeKind::Loop => Err(CompileError::UnsupportedConstruct {
                node: node.id,
                node_type: node.node_type.clone(),
            }),
            NodeKind::Entry | NodeKind::FunctionDefinition => Err(CompileError::Structural {
                node: node.id,
                detail: format!(
                    "'{}' is a path root and cannot appear mid-sequence",
                    node.node_type
                ),
            }),
            NodeKind::Function
            | NodeKind::FunctionCall
            | NodeKind::FunctionReturn
            | NodeKind::Generic => {
                if definition.emit_code().is_some() {
                    self.emit_call(node, definition, emitter)?;
                } else {
                    self.emit_placeholder(emitter)?;
                }
                Ok(self.next_sequence(node))
            }
        }
    }

    /// Empty placeholder block for nodes without a code-emission
    /// capability, so structural markers stay inspectable in the output.
    fn emit_placeholder(&mut self, emitter: &mut CodeEmitter) -> Result<(), CompileError> {
        emitter.open_brace();
        emitter.close_brace()
    }

    /// The single outgoing sequence connection of a node, if any.
    pub(crate) fn next_sequence(&self, node: &'a NodeInstance) -> Option<&'a Connection> {
        let graph = self.graph;
        node.outputs
            .iter()
            .filter(|pin| pin.data_type.is_sequence())
            .find_map(|pin| graph.sequence_target(node.id, &pin.name))
    }

    pub(crate) fn definition_for(
        &self,
        node: &NodeInstance,
    ) -> Result<&'a NodeDefinition, CompileError> {
        let registry = self.registry;
        registry
            .definition(&node.node_type)
            .ok_or_else(|| CompileError::UnknownNodeType {
                node: node.id,
                node_type: node.node_type.clone(),
            })
    }

    pub(crate) fn resolve_node(&self, id: NodeId) -> Result<&'a NodeInstance, CompileError> {
        let graph = self.graph;
        graph.node(id).ok_or_else(|| CompileError::Structural {
            node: id,
            detail: "node does not exist".to_string(),
        })
    }

    fn destination(&self, connection: &Connection) -> Result<&'a NodeInstance, CompileError> {
        let graph = self.graph;
        graph
            .node(connection.target_node)
            .ok_or_else(|| CompileError::Structural {
                node: connection.target_node,
                detail: format!(
                    "dangling sequence connection from {} '{}'",
                    connection.source_node, connection.source_pin
                ),
            })
    }
}

fn provenance(node: &NodeInstance, definition: &NodeDefinition) -> String {
    match &definition.library {
        Some(library) => format!("node {} {} [{}]", node.id, node.node_type, library),
        None => format!("node {} {}", node.id, node.node_type),
    }
}
