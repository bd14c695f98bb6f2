//! Printer - serializes a `NodeArena` back to JavaScript source text.
//!
//! The printer is purely structural: it never consults the original source
//! text, so comments and original formatting are not preserved. Explicit
//! parentheses survive because the parser keeps them as
//! `ParenthesizedExpression` nodes, which means a tree produced by the parser
//! (and rewritten by a transform that only adds call wrappers) prints without
//! any precedence analysis.
//!
//! # Layout
//!
//! - `source_writer` - output buffer with indentation tracking
//! - `helpers` - write helpers and list emission
//! - `statements` - statements, declarations and module items
//! - `expressions` - expressions and literals
//! - `functions` - functions, arrows, classes and binding patterns

mod expressions;
mod functions;
mod helpers;
mod source_writer;
mod statements;

use autocon_common::limits::MAX_EMIT_DEPTH;
use autocon_parser::parser::node::{NodeArena, NodeData};
use autocon_parser::NodeIndex;
use source_writer::SourceWriter;
use tracing::warn;

/// Line terminator written between statements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NewLineKind {
    #[default]
    LineFeed,
    CarriageReturnLineFeed,
}

impl NewLineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NewLineKind::LineFeed => "\n",
            NewLineKind::CarriageReturnLineFeed => "\r\n",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PrinterOptions {
    /// Spaces per indentation level
    pub indent_width: usize,
    pub new_line: NewLineKind,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            indent_width: 4,
            new_line: NewLineKind::LineFeed,
        }
    }
}

pub struct Printer<'a> {
    pub(super) arena: &'a NodeArena,
    pub(super) writer: SourceWriter,
    /// Current recursion depth for stack overflow protection
    pub(super) emit_depth: u32,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Self::with_options(arena, PrinterOptions::default())
    }

    pub fn with_options(arena: &'a NodeArena, options: PrinterOptions) -> Self {
        Printer {
            arena,
            writer: SourceWriter::new(options.indent_width, options.new_line.as_str()),
            emit_depth: 0,
        }
    }

    /// Print the tree rooted at `root` and return the text. The printer can
    /// be reused; each call starts from an empty buffer.
    pub fn print(&mut self, root: NodeIndex) -> String {
        self.writer.reset();
        self.emit_depth = 0;
        match self.arena.get(root).map(|n| &n.data) {
            Some(NodeData::SourceFile(_)) => self.emit_source_file(root),
            Some(_) => self.emit_statement(root),
            None => {}
        }
        self.writer.take_output()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Emit a node in statement position. Declarations that double as `for`
    /// heads get their terminating semicolon here.
    pub(super) fn emit_statement(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        if let NodeData::VariableDeclaration(_) = node.data {
            self.emit(idx);
            self.write_semicolon();
        } else {
            self.emit(idx);
        }
    }

    /// Emit any node.
    pub(super) fn emit(&mut self, idx: NodeIndex) {
        let Some(node) = self.arena.get(idx) else {
            return;
        };
        if self.emit_depth >= MAX_EMIT_DEPTH {
            warn!(node = idx.0, limit = MAX_EMIT_DEPTH, "emit depth limit reached");
            return;
        }
        self.emit_depth += 1;

        match &node.data {
            NodeData::SourceFile(_) => self.emit_source_file(idx),

            // Statements
            NodeData::ExpressionStatement(stmt) => {
                self.emit(stmt.expression);
                self.write_semicolon();
            }
            NodeData::VariableDeclaration(decl) => self.emit_variable_declaration(decl),
            NodeData::VariableDeclarator(decl) => self.emit_variable_declarator(decl),
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                self.emit_function(func)
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                self.emit_class(class)
            }
            NodeData::Block(block) => self.emit_block(&block.statements),
            NodeData::IfStatement(stmt) => self.emit_if_statement(stmt),
            NodeData::WhileStatement(stmt) => self.emit_while_statement(stmt),
            NodeData::DoWhileStatement(stmt) => self.emit_do_statement(stmt),
            NodeData::ForStatement(stmt) => self.emit_for_statement(stmt),
            NodeData::ForInStatement(stmt) => self.emit_for_in_of_statement(stmt, "in"),
            NodeData::ForOfStatement(stmt) => self.emit_for_in_of_statement(stmt, "of"),
            NodeData::ReturnStatement(stmt) => self.emit_keyword_statement("return", stmt.argument),
            NodeData::ThrowStatement(stmt) => self.emit_keyword_statement("throw", stmt.argument),
            NodeData::BreakStatement(stmt) => self.emit_keyword_statement("break", stmt.label),
            NodeData::ContinueStatement(stmt) => {
                self.emit_keyword_statement("continue", stmt.label)
            }
            NodeData::TryStatement(stmt) => self.emit_try_statement(stmt),
            NodeData::CatchClause(clause) => self.emit_catch_clause(clause),
            NodeData::SwitchStatement(stmt) => self.emit_switch_statement(stmt),
            NodeData::SwitchCase(case) => self.emit_switch_case(case),
            NodeData::LabeledStatement(labeled) => {
                self.emit(labeled.label);
                self.write(": ");
                self.emit_statement(labeled.statement);
            }
            NodeData::EmptyStatement => self.write(";"),
            NodeData::DebuggerStatement => {
                self.write("debugger");
                self.write_semicolon();
            }

            // Modules
            NodeData::ImportDeclaration(decl) => self.emit_import_declaration(decl),
            NodeData::ImportClause(clause) => self.emit_import_clause(clause),
            NodeData::NamespaceImport(named) | NodeData::NamespaceExport(named) => {
                self.write("* as ");
                self.emit(named.name);
            }
            NodeData::NamedImports(named) | NodeData::NamedExports(named) => {
                self.emit_object_properties(&named.elements)
            }
            NodeData::ImportSpecifier(spec) | NodeData::ExportSpecifier(spec) => {
                self.emit_specifier(spec)
            }
            NodeData::ExportDeclaration(decl) => self.emit_export_declaration(decl),
            NodeData::ExportAssignment(assign) => {
                self.write("export default ");
                self.emit(assign.expression);
                self.write_semicolon();
            }

            // Class and object members
            NodeData::ClassMethod(method) | NodeData::ObjectMethod(method) => {
                self.emit_method(method)
            }
            NodeData::ClassProperty(prop) => self.emit_class_property(prop),
            NodeData::PropertyAssignment(prop) => self.emit_property_assignment(prop),

            // Expressions
            NodeData::Identifier(ident) => self.write(&ident.name),
            NodeData::NumericLiteral(lit) => self.write(&lit.raw),
            NodeData::StringLiteral(lit) => self.write(&lit.raw),
            NodeData::BooleanLiteral(lit) => self.write(if lit.value { "true" } else { "false" }),
            NodeData::NullLiteral => self.write("null"),
            NodeData::ThisExpression => self.write("this"),
            NodeData::Super => self.write("super"),
            NodeData::Import => self.write("import"),
            NodeData::ArrayLiteral(list) | NodeData::ArrayPattern(list) => {
                self.emit_array_elements(&list.elements)
            }
            NodeData::ObjectLiteral(obj) | NodeData::ObjectPattern(obj) => {
                self.emit_object_properties(&obj.properties)
            }
            NodeData::SpreadElement(spread) | NodeData::RestElement(spread) => {
                self.write("...");
                self.emit(spread.argument);
            }
            NodeData::ArrowFunction(arrow) => self.emit_arrow_function(arrow),
            NodeData::CallExpression(call) => {
                self.emit_call_expression(call, node.is_optional_chain())
            }
            NodeData::NewExpression(call) => {
                self.write("new ");
                self.emit_call_expression(call, false);
            }
            NodeData::MemberExpression(member) => self.emit_member_expression(member),
            NodeData::UnaryExpression(unary) => self.emit_unary_expression(unary),
            NodeData::UpdateExpression(update) => self.emit_update_expression(update),
            NodeData::BinaryExpression(bin)
            | NodeData::LogicalExpression(bin)
            | NodeData::AssignmentExpression(bin) => self.emit_binary_expression(bin),
            NodeData::ConditionalExpression(cond) => self.emit_conditional_expression(cond),
            NodeData::SequenceExpression(seq) => self.emit_comma_list(&seq.expressions),
            NodeData::ParenthesizedExpression(paren) => {
                self.write("(");
                self.emit(paren.expression);
                self.write(")");
            }
            NodeData::AwaitExpression(expr) => {
                self.write("await ");
                self.emit(expr.argument);
            }
            NodeData::YieldExpression(expr) => self.emit_yield_expression(expr),
            NodeData::AssignmentPattern(pattern) => {
                self.emit(pattern.left);
                self.write(" = ");
                self.emit(pattern.right);
            }
        }

        self.emit_depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocon_parser::ParserState;

    fn print_with(source: &str, options: PrinterOptions) -> String {
        let mut parser = ParserState::new("test.js".to_string(), source.to_string());
        let root = parser.parse_source_file();
        assert!(parser.parse_diagnostics.is_empty());
        Printer::with_options(&parser.arena, options).print(root)
    }

    #[test]
    fn honours_indent_width_and_new_line() {
        let options = PrinterOptions {
            indent_width: 2,
            new_line: NewLineKind::CarriageReturnLineFeed,
        };
        assert_eq!(
            print_with("if (a) { b(); }", options),
            "if (a) {\r\n  b();\r\n}\r\n"
        );
    }

    #[test]
    fn printing_twice_starts_from_empty_output() {
        let mut parser = ParserState::new("test.js".to_string(), "a;".to_string());
        let root = parser.parse_source_file();
        let mut printer = Printer::new(&parser.arena);
        assert_eq!(printer.print(root), "a;\n");
        assert_eq!(printer.print(root), "a;\n");
    }

    #[test]
    fn missing_root_prints_nothing() {
        let arena = NodeArena::new();
        assert_eq!(Printer::new(&arena).print(NodeIndex::NONE), "");
    }
}
