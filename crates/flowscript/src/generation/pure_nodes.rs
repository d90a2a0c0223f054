//! # Pure Dependency Resolution
//!
//! Resolves one consumer input to an argument token, in order: constant
//! literal, previously bound variable, or on-demand emission of the pure
//! producer. The recursion happens inside a pure scope: bindings created
//! while the scope is open are purged when the outermost scope closes, so
//! locally synthesized temporaries never leak past the block they were
//! emitted into.
//!
//! Purity is an explicit declaration on the node definition. A producer
//! that is not declared pure and has not already executed on the sequence
//! path is conservatively rejected rather than silently reordered.

use flowgraph::{NodeInstance, Pin};
use tracing::{debug, trace};

use crate::emitter::CodeEmitter;
use crate::error::CompileError;
use crate::options::UnresolvedPolicy;
use crate::registry::NodeDefinition;

use super::code_generator::CodeGenerator;
use super::literals::format_constant;

/// Token substituted for an input that could not be resolved, when policy
/// or an optional pin permits degrading instead of aborting.
pub const PLACEHOLDER_TOKEN: &str = "/* unresolved */null";

/// Textual form of one resolved input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentToken {
    /// A constant formatted as a literal.
    Literal(String),
    /// A previously bound variable name.
    Variable(String),
    /// The degraded token for an unresolved input.
    Placeholder,
}

impl ArgumentToken {
    pub fn render(&self) -> String {
        match self {
            ArgumentToken::Literal(text) | ArgumentToken::Variable(text) => text.clone(),
            ArgumentToken::Placeholder => PLACEHOLDER_TOKEN.to_string(),
        }
    }
}

impl<'a> CodeGenerator<'a> {
    /// Resolve one input pin of `node` to an argument token.
    ///
    /// Optional pins, and every pin under the placeholder policy, degrade
    /// to [`ArgumentToken::Placeholder`] instead of failing.
    pub(crate) fn resolve_input(
        &mut self,
        node: &'a NodeInstance,
        pin: &Pin,
        emitter: &mut CodeEmitter,
    ) -> Result<ArgumentToken, CompileError> {
        match self.resolve_required(node, pin, emitter) {
            Ok(token) => Ok(token),
            Err(CompileError::UnresolvedInput {
                node: at,
                input,
                reason,
            }) if pin.optional || self.options.unresolved == UnresolvedPolicy::Placeholder => {
                debug!(node = %at, input = %input, %reason, "substituting placeholder token");
                Ok(ArgumentToken::Placeholder)
            }
            Err(other) => Err(other),
        }
    }

    fn resolve_required(
        &mut self,
        node: &'a NodeInstance,
        pin: &Pin,
        emitter: &mut CodeEmitter,
    ) -> Result<ArgumentToken, CompileError> {
        let graph = self.graph;

        let Some(connection) = graph.data_source(node.id, &pin.name) else {
            return match graph.constant(node.id, &pin.name) {
                Some(value) => Ok(ArgumentToken::Literal(format_constant(value))),
                None => Err(CompileError::UnresolvedInput {
                    node: node.id,
                    input: pin.name.clone(),
                    reason: "no incoming data connection and no constant".to_string(),
                }),
            };
        };

        if let Some(variable) = self.binder.lookup(connection.source_node, &connection.source_pin) {
            return Ok(ArgumentToken::Variable(variable.to_string()));
        }

        // The producer has not been emitted in this scope; it must be an
        // upstream pure dependency.
        let producer = self.resolve_node(connection.source_node)?;
        let producer_def = self.definition_for(producer)?;
        if !producer_def.pure {
            return Err(CompileError::UnresolvedInput {
                node: node.id,
                input: pin.name.clone(),
                reason: format!(
                    "producer {} '{}' is not declared pure and has not executed on the sequence path",
                    producer.id, producer.node_type
                ),
            });
        }

        self.binder.begin_scope();
        if self.options.comments {
            emitter.comment(&format!("pure: node {} {}", producer.id, producer.node_type));
        }
        let emitted = self.emit_pure_node(producer, producer_def, emitter);
        if self.options.comments && emitted.is_ok() {
            emitter.comment("pure: end");
        }
        let retry = self
            .binder
            .lookup(connection.source_node, &connection.source_pin)
            .map(str::to_string);
        self.binder.end_scope();
        emitted?;

        match retry {
            Some(variable) => Ok(ArgumentToken::Variable(variable)),
            None => Err(CompileError::UnresolvedInput {
                node: node.id,
                input: pin.name.clone(),
                reason: format!(
                    "pure producer {} emitted no binding for output '{}'",
                    producer.id, connection.source_pin
                ),
            }),
        }
    }

    /// Materialize a pure producer: its own unresolved inputs recurse
    /// through [`Self::resolve_input`] before its call text is emitted.
    fn emit_pure_node(
        &mut self,
        node: &'a NodeInstance,
        definition: &'a NodeDefinition,
        emitter: &mut CodeEmitter,
    ) -> Result<(), CompileError> {
        trace!(node = %node.id, node_type = %node.node_type, "materializing pure dependency");
        if definition.emit_code().is_none() {
            return Err(CompileError::Structural {
                node: node.id,
                detail: "pure node has no code emission capability".to_string(),
            });
        }
        self.pure_evaluations += 1;
        self.emit_call(node, definition, emitter)
    }
}
