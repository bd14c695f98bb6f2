use super::Printer;
use autocon_parser::parser::node::{
    CatchClauseData, ExportDeclData, ForInOfData, ForStatementData, IfStatementData,
    ImportClauseData, ImportDeclData, LoopData, NodeData, SpecifierData, SwitchCaseData,
    SwitchStatementData, TryStatementData, VariableDeclarationData, VariableDeclaratorData,
};
use autocon_parser::{NodeIndex, NodeList};

impl<'a> Printer<'a> {
    // =========================================================================
    // Source file and blocks
    // =========================================================================

    pub(super) fn emit_source_file(&mut self, idx: NodeIndex) {
        let Some(NodeData::SourceFile(sf)) = self.arena.get(idx).map(|n| &n.data) else {
            return;
        };
        self.emit_statement_lines(&sf.statements);
    }

    pub(super) fn emit_block(&mut self, statements: &NodeList) {
        if statements.is_empty() {
            self.write("{ }");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statement_lines(statements);
        self.decrease_indent();
        self.write("}");
    }

    fn is_block(&self, idx: NodeIndex) -> bool {
        matches!(
            self.arena.get(idx).map(|n| &n.data),
            Some(NodeData::Block(_))
        )
    }

    /// Body of an `if`/loop: blocks stay on the same line, anything else goes
    /// on its own indented line.
    fn emit_embedded_statement(&mut self, idx: NodeIndex) {
        if self.is_block(idx) {
            self.write_space();
            self.emit(idx);
            return;
        }
        self.write_line();
        self.increase_indent();
        self.emit_statement(idx);
        self.decrease_indent();
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(super) fn emit_variable_declaration(&mut self, decl: &VariableDeclarationData) {
        self.write(decl.kind.text());
        self.write_space();
        self.emit_comma_list(&decl.declarations);
    }

    pub(super) fn emit_variable_declarator(&mut self, decl: &VariableDeclaratorData) {
        self.emit(decl.name);
        if decl.initializer.is_some() {
            self.write(" = ");
            self.emit(decl.initializer);
        }
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub(super) fn emit_if_statement(&mut self, stmt: &IfStatementData) {
        self.write("if (");
        self.emit(stmt.test);
        self.write(")");
        self.emit_embedded_statement(stmt.consequent);
        if stmt.alternate.is_none() {
            return;
        }
        if self.is_block(stmt.consequent) {
            self.write_space();
        } else {
            self.write_line();
        }
        self.write("else");
        if matches!(
            self.arena.get(stmt.alternate).map(|n| &n.data),
            Some(NodeData::IfStatement(_))
        ) {
            self.write_space();
            self.emit(stmt.alternate);
        } else {
            self.emit_embedded_statement(stmt.alternate);
        }
    }

    pub(super) fn emit_while_statement(&mut self, stmt: &LoopData) {
        self.write("while (");
        self.emit(stmt.test);
        self.write(")");
        self.emit_embedded_statement(stmt.body);
    }

    pub(super) fn emit_do_statement(&mut self, stmt: &LoopData) {
        self.write("do");
        self.emit_embedded_statement(stmt.body);
        if self.is_block(stmt.body) {
            self.write_space();
        } else {
            self.write_line();
        }
        self.write("while (");
        self.emit(stmt.test);
        self.write(")");
        self.write_semicolon();
    }

    pub(super) fn emit_for_statement(&mut self, stmt: &ForStatementData) {
        self.write("for (");
        self.emit(stmt.init);
        self.write(";");
        self.emit_optional_with_space(stmt.test);
        self.write(";");
        self.emit_optional_with_space(stmt.update);
        self.write(")");
        self.emit_embedded_statement(stmt.body);
    }

    pub(super) fn emit_for_in_of_statement(&mut self, stmt: &ForInOfData, keyword: &str) {
        self.write("for (");
        self.emit(stmt.left);
        self.write_space();
        self.write(keyword);
        self.write_space();
        self.emit(stmt.right);
        self.write(")");
        self.emit_embedded_statement(stmt.body);
    }

    /// `return x;`, `throw x;`, `break label;`, `continue;`
    pub(super) fn emit_keyword_statement(&mut self, keyword: &str, operand: NodeIndex) {
        self.write(keyword);
        self.emit_optional_with_space(operand);
        self.write_semicolon();
    }

    pub(super) fn emit_try_statement(&mut self, stmt: &TryStatementData) {
        self.write("try ");
        self.emit(stmt.block);
        if stmt.handler.is_some() {
            self.write_space();
            self.emit(stmt.handler);
        }
        if stmt.finalizer.is_some() {
            self.write(" finally ");
            self.emit(stmt.finalizer);
        }
    }

    pub(super) fn emit_catch_clause(&mut self, clause: &CatchClauseData) {
        self.write("catch ");
        if clause.param.is_some() {
            self.write("(");
            self.emit(clause.param);
            self.write(") ");
        }
        self.emit(clause.body);
    }

    pub(super) fn emit_switch_statement(&mut self, stmt: &SwitchStatementData) {
        self.write("switch (");
        self.emit(stmt.discriminant);
        self.write(") {");
        self.write_line();
        self.increase_indent();
        for &case in &stmt.cases.nodes {
            self.ensure_new_line();
            self.emit(case);
        }
        self.decrease_indent();
        self.ensure_new_line();
        self.write("}");
    }

    pub(super) fn emit_switch_case(&mut self, case: &SwitchCaseData) {
        if case.test.is_some() {
            self.write("case ");
            self.emit(case.test);
            self.write(":");
        } else {
            self.write("default:");
        }
        self.write_line();
        self.increase_indent();
        self.emit_statement_lines(&case.consequent);
        self.decrease_indent();
    }

    // =========================================================================
    // Modules
    // =========================================================================

    pub(super) fn emit_import_declaration(&mut self, decl: &ImportDeclData) {
        self.write("import ");
        if decl.import_clause.is_some() {
            self.emit(decl.import_clause);
            self.write(" from ");
        }
        self.emit(decl.module_specifier);
        self.write_semicolon();
    }

    pub(super) fn emit_import_clause(&mut self, clause: &ImportClauseData) {
        self.emit(clause.name);
        if clause.name.is_some() && clause.named_bindings.is_some() {
            self.write(", ");
        }
        self.emit(clause.named_bindings);
    }

    pub(super) fn emit_specifier(&mut self, spec: &SpecifierData) {
        if spec.property_name.is_some() {
            self.emit(spec.property_name);
            self.write(" as ");
        }
        self.emit(spec.name);
    }

    /// Declarations print their own terminator; clause forms get `;`.
    pub(super) fn emit_export_declaration(&mut self, decl: &ExportDeclData) {
        self.write("export ");
        if decl.is_default_export {
            self.write("default ");
        }
        let clause = self.arena.get(decl.export_clause).map(|n| &n.data);
        match clause {
            Some(NodeData::NamedExports(_) | NodeData::NamespaceExport(_)) | None => {
                if clause.is_none() {
                    self.write("*");
                }
                self.emit(decl.export_clause);
                if decl.module_specifier.is_some() {
                    self.write(" from ");
                    self.emit(decl.module_specifier);
                }
                self.write_semicolon();
            }
            Some(_) => self.emit_statement(decl.export_clause),
        }
    }
}
