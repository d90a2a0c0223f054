//! # Code Emitter
//!
//! Indentation-tracking text buffer. Every other part of the code generator
//! writes into one of these; nested constructs (branch arms, method bodies)
//! write into child emitters that are spliced back verbatim.
//!
//! `close_brace` pops the depth *before* emitting, so the closing brace
//! itself sits at the outer depth. Popping below depth zero is a usage
//! error and fails loudly with [`CompileError::EmitterMisuse`] rather than
//! clamping; a mismatch means the dispatch logic is broken and must
//! surface during development.

use crate::error::CompileError;
use crate::options::IndentStyle;

#[derive(Debug, Clone)]
pub struct CodeEmitter {
    unit: String,
    depth: usize,
    text: String,
}

impl CodeEmitter {
    pub fn new(indent: IndentStyle) -> Self {
        Self::with_depth(indent, 0)
    }

    /// An emitter starting at a given depth. Used for bodies generated
    /// separately from the document shell that encloses them.
    pub fn with_depth(indent: IndentStyle, depth: usize) -> Self {
        Self {
            unit: indent.unit(),
            depth,
            text: String::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Append one line at the current depth. An empty line stays empty.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.text.push_str(&self.unit);
            }
            self.text.push_str(text);
        }
        self.text.push('\n');
    }

    /// Append multi-line text, re-indenting every line at the current depth.
    pub fn block(&mut self, text: &str) {
        for line in text.lines() {
            self.line(line);
        }
    }

    pub fn comment(&mut self, text: &str) {
        self.line(&format!("// {}", text));
    }

    pub fn blank(&mut self, n: usize) {
        for _ in 0..n {
            self.text.push('\n');
        }
    }

    pub fn open_brace(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    pub fn close_brace(&mut self) -> Result<(), CompileError> {
        if self.depth == 0 {
            return Err(CompileError::EmitterMisuse);
        }
        self.depth -= 1;
        self.line("}");
        Ok(())
    }

    /// A sub-emitter seeded at this emitter's current depth, so its text
    /// can be spliced back verbatim.
    pub fn child(&self) -> CodeEmitter {
        Self {
            unit: self.unit.clone(),
            depth: self.depth,
            text: String::new(),
        }
    }

    /// Append a child emitter's text verbatim.
    pub fn splice(&mut self, child: CodeEmitter) {
        self.text.push_str(&child.text);
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_lines_by_depth() {
        let mut e = CodeEmitter::new(IndentStyle::Spaces(4));
        e.line("a;");
        e.open_brace();
        e.line("b;");
        e.close_brace().unwrap();

        assert_eq!(e.finish(), "a;\n{\n    b;\n}\n");
    }

    #[test]
    fn close_brace_sits_at_outer_depth() {
        let mut e = CodeEmitter::new(IndentStyle::Spaces(2));
        e.open_brace();
        e.open_brace();
        e.close_brace().unwrap();
        e.close_brace().unwrap();

        assert_eq!(e.finish(), "{\n  {\n  }\n}\n");
    }

    #[test]
    fn close_below_zero_is_misuse() {
        let mut e = CodeEmitter::new(IndentStyle::default());
        assert!(matches!(e.close_brace(), Err(CompileError::EmitterMisuse)));
    }

    #[test]
    fn block_reindents_each_line() {
        let mut e = CodeEmitter::new(IndentStyle::Spaces(4));
        e.open_brace();
        e.block("x;\ny;");
        e.close_brace().unwrap();

        assert_eq!(e.finish(), "{\n    x;\n    y;\n}\n");
    }

    #[test]
    fn child_starts_at_parent_depth_and_splices_verbatim() {
        let mut e = CodeEmitter::new(IndentStyle::Spaces(4));
        e.open_brace();

        let mut arm = e.child();
        assert_eq!(arm.depth(), 1);
        arm.line("inner;");

        e.splice(arm);
        e.close_brace().unwrap();

        assert_eq!(e.finish(), "{\n    inner;\n}\n");
    }

    #[test]
    fn tabs_as_indent_unit() {
        let mut e = CodeEmitter::new(IndentStyle::Tabs);
        e.open_brace();
        e.line("x;");
        e.close_brace().unwrap();

        assert_eq!(e.finish(), "{\n\tx;\n}\n");
    }

    #[test]
    fn blank_lines_carry_no_indentation() {
        let mut e = CodeEmitter::new(IndentStyle::Spaces(4));
        e.open_brace();
        e.blank(2);
        e.line("");
        e.close_brace().unwrap();

        assert_eq!(e.finish(), "{\n\n\n\n}\n");
    }
}
