//! # Branch Emission
//!
//! The two-way fork is the only control-flow shape with generic handling.
//! Exactly one data input (the condition) is a hard precondition. The two
//! named sequence outputs are queried independently; either, both or
//! neither may be connected. Each connected arm is walked into a child
//! emitter seeded inside the braces, then spliced back. The `else` block
//! is omitted entirely when the false path is absent.

use flowgraph::{Connection, NodeInstance, Pin};

use crate::emitter::CodeEmitter;
use crate::error::CompileError;

use super::code_generator::CodeGenerator;

impl<'a> CodeGenerator<'a> {
    pub(crate) fn emit_branch(
        &mut self,
        node: &'a NodeInstance,
        emitter: &mut CodeEmitter,
    ) -> Result<(), CompileError> {
        let inputs: Vec<&Pin> = node.data_inputs().collect();
        if inputs.len() != 1 {
            return Err(CompileError::Arity {
                node: node.id,
                found: inputs.len(),
            });
        }
        let condition = self.resolve_input(node, inputs[0], emitter)?.render();

        let true_path = self.branch_arm(node, "true");
        let false_path = self.branch_arm(node, "false");

        emitter.line(&format!("if ({})", condition));
        emitter.open_brace();
        if let Some(connection) = true_path {
            self.walk_spliced(connection, emitter)?;
        }
        emitter.close_brace()?;

        if let Some(connection) = false_path {
            emitter.line("else");
            emitter.open_brace();
            self.walk_spliced(connection, emitter)?;
            emitter.close_brace()?;
        }
        Ok(())
    }

    /// The sequence connection out of the branch's named arm output.
    fn branch_arm(&self, node: &'a NodeInstance, which: &str) -> Option<&'a Connection> {
        let graph = self.graph;
        node.outputs
            .iter()
            .filter(|pin| pin.data_type.is_sequence())
            .find(|pin| pin.name.eq_ignore_ascii_case(which))
            .and_then(|pin| graph.sequence_target(node.id, &pin.name))
    }
}
