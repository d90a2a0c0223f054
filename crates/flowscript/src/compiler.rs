//! # Compiler Entry Points
//!
//! Orchestrates one compilation pass: collect path roots, emit one method
//! per function-definition node and one entry procedure per entry node,
//! then wrap everything in the namespace/class shell and prepend the
//! import list collected while the bodies were emitted.
//!
//! All mutable state lives in the pass-local [`CodeGenerator`]; compiling
//! the same graph twice with fresh state yields byte-identical text, and
//! independent compilations may run in parallel as long as each owns its
//! own generator.

use flowgraph::{GraphDescription, NodeInstance};
use tracing::{debug, info};

use crate::emitter::CodeEmitter;
use crate::error::CompileError;
use crate::generation::CodeGenerator;
use crate::options::CompileOptions;
use crate::registry::{NodeKind, NodeRegistry};

/// Result of a successful pass.
#[derive(Debug, Clone)]
pub struct CompiledScript {
    pub source: String,
    pub stats: CompileStats,
}

#[derive(Debug, Clone, Default)]
pub struct CompileStats {
    pub nodes: usize,
    pub connections: usize,
    pub functions: usize,
    pub entries: usize,
    /// Nodes emitted along sequence paths.
    pub dispatched: usize,
    /// Pure producers materialized on demand.
    pub pure_evaluations: usize,
    pub generated_bytes: usize,
}

pub struct Compiler<'r> {
    registry: &'r NodeRegistry,
    options: CompileOptions,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r NodeRegistry) -> Self {
        Self::with_options(registry, CompileOptions::default())
    }

    pub fn with_options(registry: &'r NodeRegistry, options: CompileOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn compile(&self, graph: &GraphDescription) -> Result<CompiledScript, CompileError> {
        info!(
            graph = %graph.name,
            nodes = graph.nodes.len(),
            connections = graph.connections.len(),
            "starting compilation"
        );

        let mut generator = CodeGenerator::new(graph, self.registry, &self.options);

        let mut functions: Vec<&NodeInstance> = Vec::new();
        let mut entries: Vec<&NodeInstance> = Vec::new();
        for node in graph.nodes.values() {
            if let Some(definition) = self.registry.definition(&node.node_type) {
                match definition.kind {
                    NodeKind::FunctionDefinition => functions.push(node),
                    NodeKind::Entry => entries.push(node),
                    _ => {}
                }
            }
        }
        if functions.is_empty() && entries.is_empty() {
            return Err(CompileError::NoEntryPoints {
                graph: graph.name.clone(),
            });
        }
        debug!(
            functions = functions.len(),
            entries = entries.len(),
            "collected path roots"
        );

        // Members sit two levels deep: namespace, then class.
        let mut body = CodeEmitter::with_depth(self.options.indent, 2);
        let mut first = true;
        for &node in &functions {
            if !first {
                body.blank(1);
            }
            first = false;
            generator.emit_function(node, &mut body)?;
            generator.clear_member_bindings();
        }
        for (index, &node) in entries.iter().enumerate() {
            if !first {
                body.blank(1);
            }
            first = false;
            let name = if index == 0 {
                self.options.entry_name.clone()
            } else {
                format!("{}{}", self.options.entry_name, index + 1)
            };
            generator.emit_entry(node, &name, &mut body)?;
            generator.clear_member_bindings();
        }

        let class_name = self
            .options
            .class_name
            .clone()
            .unwrap_or_else(|| derive_class_name(&graph.name));

        let mut document = CodeEmitter::new(self.options.indent);
        for library in generator.imports.iter() {
            document.line(&format!("using {};", library));
        }
        if !generator.imports.is_empty() {
            document.blank(1);
        }
        document.line(&format!("namespace {}", self.options.namespace));
        document.open_brace();
        document.line(&format!("public class {}", class_name));
        document.open_brace();
        document.splice(body);
        document.close_brace()?;
        document.close_brace()?;

        let source = document.finish();
        let stats = CompileStats {
            nodes: graph.nodes.len(),
            connections: graph.connections.len(),
            functions: functions.len(),
            entries: entries.len(),
            dispatched: generator.dispatched,
            pure_evaluations: generator.pure_evaluations,
            generated_bytes: source.len(),
        };
        info!(
            bytes = stats.generated_bytes,
            dispatched = stats.dispatched,
            pure = stats.pure_evaluations,
            "compilation complete"
        );
        Ok(CompiledScript { source, stats })
    }
}

/// Compile a graph with default options, returning the generated text.
pub fn compile_graph(
    graph: &GraphDescription,
    registry: &NodeRegistry,
) -> Result<String, CompileError> {
    Compiler::new(registry)
        .compile(graph)
        .map(|script| script.source)
}

/// Class name derived from the graph name: non-alphanumeric runs become
/// word boundaries, words are capitalized.
fn derive_class_name(graph_name: &str) -> String {
    let mut out = String::new();
    let mut upper_next = true;
    for ch in graph_name.chars() {
        if ch.is_ascii_alphanumeric() {
            if upper_next {
                out.extend(ch.to_uppercase());
                upper_next = false;
            } else {
                out.push(ch);
            }
        } else {
            upper_next = true;
        }
    }
    match out.chars().next() {
        None => "GeneratedScript".to_string(),
        Some(first) if first.is_ascii_digit() => format!("Graph{}", out),
        Some(_) => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_derivation() {
        assert_eq!(derive_class_name("my test graph"), "MyTestGraph");
        assert_eq!(derive_class_name("hud_overlay"), "HudOverlay");
        assert_eq!(derive_class_name("2d scene"), "Graph2dScene");
        assert_eq!(derive_class_name("!!!"), "GeneratedScript");
    }

    #[test]
    fn empty_graph_has_no_entry_points() {
        let registry = NodeRegistry::new();
        let graph = GraphDescription::new("empty");

        let err = compile_graph(&graph, &registry).unwrap_err();
        assert!(matches!(err, CompileError::NoEntryPoints { .. }));
    }
}
