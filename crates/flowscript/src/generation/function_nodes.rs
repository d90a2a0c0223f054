//! # Call-Style Node Emission
//!
//! Library calls, graph function calls and returns are generated as
//! sequential statements along the sequence chain: resolve one argument
//! token per declared data input, allocate one fresh variable per declared
//! data output, hand both to the node's code-emission capability, splice
//! the returned text, then record the output bindings and the node's
//! library membership.

use flowgraph::NodeInstance;

use crate::emitter::CodeEmitter;
use crate::error::CompileError;
use crate::registry::NodeDefinition;

use super::code_generator::CodeGenerator;

impl<'a> CodeGenerator<'a> {
    pub(crate) fn emit_call(
        &mut self,
        node: &'a NodeInstance,
        definition: &'a NodeDefinition,
        emitter: &mut CodeEmitter,
    ) -> Result<(), CompileError> {
        let mut args = Vec::new();
        for pin in node.data_inputs() {
            let token = self.resolve_input(node, pin, emitter)?;
            args.push(token.render());
        }

        let mut bindings = Vec::new();
        for pin in node.data_outputs() {
            bindings.push((pin.name.as_str(), self.binder.allocate(&pin.name)));
        }
        let outputs: Vec<String> = bindings.iter().map(|(_, name)| name.clone()).collect();

        let emission = definition
            .emit_code()
            .ok_or_else(|| CompileError::Structural {
                node: node.id,
                detail: "node has no code emission capability".to_string(),
            })?;

        let text = emission.emit(node, &args, &outputs);
        emitter.block(&text);

        for (pin, variable) in bindings {
            self.binder.bind(node.id, pin, variable);
        }
        if let Some(library) = &definition.library {
            self.imports.record(library);
        }
        Ok(())
    }
}
