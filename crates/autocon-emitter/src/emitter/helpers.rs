use super::Printer;
use autocon_parser::{NodeIndex, NodeList};

impl<'a> Printer<'a> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    /// Write text to output.
    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    /// Write a newline.
    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    /// Write a space.
    pub(super) fn write_space(&mut self) {
        self.writer.write(" ");
    }

    pub(super) fn write_semicolon(&mut self) {
        self.write(";");
    }

    /// Increase indentation.
    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    /// Decrease indentation.
    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    /// Start a new line unless the writer is already at one.
    pub(super) fn ensure_new_line(&mut self) {
        if !self.writer.is_at_line_start() {
            self.write_line();
        }
    }

    // =========================================================================
    // List Helpers
    // =========================================================================

    /// `a, b, c`
    pub(super) fn emit_comma_list(&mut self, list: &NodeList) {
        for (i, &idx) in list.nodes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit(idx);
        }
    }

    /// `(a, b)`
    pub(super) fn emit_parameters(&mut self, parameters: &NodeList) {
        self.write("(");
        self.emit_comma_list(parameters);
        self.write(")");
    }

    /// One statement per line at the current indentation.
    pub(super) fn emit_statement_lines(&mut self, statements: &NodeList) {
        for &stmt in &statements.nodes {
            self.ensure_new_line();
            self.emit_statement(stmt);
            self.write_line();
        }
    }

    /// Emit `idx` preceded by a space when present.
    pub(super) fn emit_optional_with_space(&mut self, idx: NodeIndex) {
        if idx.is_some() {
            self.write_space();
            self.emit(idx);
        }
    }
}
