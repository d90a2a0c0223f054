//! # Path Roots
//!
//! Entry nodes become entry procedures; function-definition nodes become
//! generated methods whose parameters are the definition node's data
//! outputs, pre-bound in the binder so body nodes wired to them resolve to
//! the parameter names. The orchestrator clears all bindings between
//! members, so one body's locals are never visible from the next.

use flowgraph::{ConstantValue, NodeInstance};
use tracing::debug;

use crate::emitter::CodeEmitter;
use crate::error::CompileError;

use super::code_generator::CodeGenerator;
use super::literals::csharp_type;

impl<'a> CodeGenerator<'a> {
    /// Emit one entry procedure rooted at an entry node.
    pub(crate) fn emit_entry(
        &mut self,
        node: &'a NodeInstance,
        name: &str,
        emitter: &mut CodeEmitter,
    ) -> Result<(), CompileError> {
        debug!(node = %node.id, procedure = name, "generating entry procedure");
        if self.options.comments {
            emitter.comment(&format!("entry node {}", node.id));
        }
        emitter.line(&format!("public void {}()", name));
        emitter.open_brace();
        if let Some(connection) = self.next_sequence(node) {
            let last = self.walk_spliced(connection, emitter)?;
            debug!(procedure = name, last_node = %last, "entry body complete");
        }
        emitter.close_brace()
    }

    /// Emit one generated method rooted at a function-definition node.
    pub(crate) fn emit_function(
        &mut self,
        node: &'a NodeInstance,
        emitter: &mut CodeEmitter,
    ) -> Result<(), CompileError> {
        let name = function_name(node);
        debug!(node = %node.id, function = %name, "generating function");
        if self.options.comments {
            emitter.comment(&format!("function definition node {}", node.id));
        }

        // Parameters are pre-bound so body nodes wired to the definition's
        // outputs resolve to the parameter names. The orchestrator clears
        // all bindings once the member is finished.
        let mut parameters = Vec::new();
        for pin in node.data_outputs() {
            let variable = self.binder.allocate(&pin.name);
            self.binder.bind(node.id, &pin.name, variable.clone());
            parameters.push(format!("{} {}", csharp_type(pin.data_type), variable));
        }

        emitter.line(&format!("public void {}({})", name, parameters.join(", ")));
        emitter.open_brace();
        if let Some(connection) = self.next_sequence(node) {
            self.walk_spliced(connection, emitter)?;
        }
        emitter.close_brace()
    }
}

/// A function definition names itself through its `name` constant;
/// unnamed definitions fall back to an id-derived name.
fn function_name(node: &NodeInstance) -> String {
    match node.constants.get("name") {
        Some(ConstantValue::String(name)) if !name.is_empty() => name.clone(),
        _ => format!("Function{}", node.id.0),
    }
}
