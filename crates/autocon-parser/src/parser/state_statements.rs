//! Parser state - statement, declaration and binding-pattern parsing.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState,
};
use autocon_common::diagnostics::diagnostic_codes;
use autocon_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_nesting() {
            return NodeIndex::NONE;
        }
        let stmt = self.parse_statement_worker();
        self.exit_nesting();
        stmt
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let start = self.token_pos();
                self.next_token();
                self.finish_node(start, NodeData::EmptyStatement)
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(VariableKind::Var),
            SyntaxKind::ConstKeyword => self.parse_variable_statement(VariableKind::Const),
            SyntaxKind::Identifier if self.is_let_declaration() => {
                self.parse_variable_statement(VariableKind::Let)
            }
            SyntaxKind::Identifier if self.is_async_function_start() => {
                self.parse_function_declaration()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::ClassKeyword => self.parse_class(true),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_or_throw(true),
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(false),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue(true),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue(false),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_pos();
                self.next_token();
                self.parse_semicolon();
                self.finish_node(start, NodeData::DebuggerStatement)
            }
            SyntaxKind::ImportKeyword if self.is_import_expression_start() => {
                self.parse_expression_statement()
            }
            SyntaxKind::ImportKeyword | SyntaxKind::ExportKeyword => {
                self.error_at_current_token(
                    "Import and export declarations are only allowed at the top level.",
                    diagnostic_codes::MODULE_ITEM_NOT_AT_TOP_LEVEL,
                );
                self.parse_module_item()
            }
            SyntaxKind::Identifier if self.is_labeled_statement_start() => {
                self.parse_labeled_statement()
            }
            SyntaxKind::WithKeyword => {
                self.error_at_current_token(
                    "'with' statements are not supported.",
                    diagnostic_codes::UNSUPPORTED_SYNTAX,
                );
                self.next_token();
                NodeIndex::NONE
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Statement directly inside the source file, where import and export
    /// declarations are also accepted.
    pub(crate) fn parse_top_level_statement(&mut self) -> NodeIndex {
        if !self.is_module_item_start() {
            return self.parse_statement();
        }
        if !self.enter_nesting() {
            return NodeIndex::NONE;
        }
        let item = self.parse_module_item();
        self.exit_nesting();
        item
    }

    fn is_module_item_start(&mut self) -> bool {
        match self.token() {
            SyntaxKind::ExportKeyword => true,
            SyntaxKind::ImportKeyword => !self.is_import_expression_start(),
            _ => false,
        }
    }

    /// `import(...)` and `import.meta` are expressions, not declarations.
    fn is_import_expression_start(&mut self) -> bool {
        let (next, _) = self.peek_token();
        matches!(next, SyntaxKind::OpenParenToken | SyntaxKind::DotToken)
    }

    fn is_labeled_statement_start(&mut self) -> bool {
        let (next, _) = self.peek_token();
        next == SyntaxKind::ColonToken
    }

    /// `let` starts a declaration only when followed by a binding on the same
    /// logical statement; otherwise it is an identifier.
    fn is_let_declaration(&mut self) -> bool {
        if !self.is_contextual("let") {
            return false;
        }
        let (next, _) = self.peek_token();
        matches!(
            next,
            SyntaxKind::Identifier | SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken
        )
    }

    pub(crate) fn is_async_function_start(&mut self) -> bool {
        if !self.is_contextual("async") {
            return false;
        }
        let (next, line_break) = self.peek_token();
        next == SyntaxKind::FunctionKeyword && !line_break
    }

    /// Parse statements until one of `terminators` (or end of file).
    pub(crate) fn parse_statement_list(&mut self, terminators: &[SyntaxKind]) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken)
            && !terminators.iter().any(|&t| self.is_token(t))
        {
            let start = self.token_pos();
            let stmt = self.parse_statement();
            if stmt.is_some() {
                statements.push(stmt);
            }
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.error_at_current_token(
                    "Declaration or statement expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        NodeList::from_vec(statements)
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(&[SyntaxKind::CloseBraceToken]);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(start, NodeData::Block(BlockData { statements }))
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        if expression.is_none() {
            return NodeIndex::NONE;
        }
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ExpressionStatement(ExpressionStatementData { expression }),
        )
    }

    fn parse_variable_statement(&mut self, kind: VariableKind) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let declarations = self.parse_variable_declarators();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::VariableDeclaration(VariableDeclarationData { kind, declarations }),
        )
    }

    /// `a = 1, [b] = c, { d }` after the `var`/`let`/`const` keyword.
    fn parse_variable_declarators(&mut self) -> NodeList {
        let mut declarations = Vec::new();
        loop {
            let start = self.token_pos();
            let name = self.parse_binding_target();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.finish_node(
                start,
                NodeData::VariableDeclarator(VariableDeclaratorData { name, initializer }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        NodeList::from_vec(declarations)
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let test = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let consequent = self.parse_statement();
        let alternate = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::IfStatement(IfStatementData {
                test,
                consequent,
                alternate,
            }),
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let test = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();
        self.finish_node(start, NodeData::WhileStatement(LoopData { test, body }))
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let body = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let test = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        // The `;` after do-while is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(start, NodeData::DoWhileStatement(LoopData { test, body }))
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.is_contextual("await") {
            self.error_at_current_token(
                "'for await' loops are not supported.",
                diagnostic_codes::UNSUPPORTED_SYNTAX,
            );
            self.next_token();
        }
        self.parse_expected(SyntaxKind::OpenParenToken);

        let init = self.parse_for_initializer();

        if init.is_some() && self.parse_optional(SyntaxKind::InKeyword) {
            let right = self.parse_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let body = self.parse_statement();
            return self.finish_node(
                start,
                NodeData::ForInStatement(ForInOfData {
                    left: init,
                    right,
                    body,
                }),
            );
        }
        if init.is_some() && self.is_contextual("of") {
            self.next_token();
            let right = self.parse_assignment_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let body = self.parse_statement();
            return self.finish_node(
                start,
                NodeData::ForOfStatement(ForInOfData {
                    left: init,
                    right,
                    body,
                }),
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();
        self.finish_node(
            start,
            NodeData::ForStatement(ForStatementData {
                init,
                test,
                update,
                body,
            }),
        )
    }

    /// The part of a `for` head before `;`, `in` or `of`.
    fn parse_for_initializer(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::SemicolonToken) {
            return NodeIndex::NONE;
        }
        let kind = match self.token() {
            SyntaxKind::VarKeyword => Some(VariableKind::Var),
            SyntaxKind::ConstKeyword => Some(VariableKind::Const),
            SyntaxKind::Identifier if self.is_let_declaration() => Some(VariableKind::Let),
            _ => None,
        };
        let flags = self.context_flags | CONTEXT_FLAG_DISALLOW_IN;
        match kind {
            Some(kind) => {
                let start = self.token_pos();
                self.next_token();
                let declarations = self.with_context(flags, |p| p.parse_variable_declarators());
                self.finish_node(
                    start,
                    NodeData::VariableDeclaration(VariableDeclarationData { kind, declarations }),
                )
            }
            None => self.with_context(flags, |p| p.parse_expression()),
        }
    }

    fn parse_return_or_throw(&mut self, is_return: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let argument = if is_return && self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            if !is_return && self.has_preceding_line_break() {
                self.error_at_current_token(
                    "Line break not permitted here.",
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
            }
            self.parse_expression()
        };
        self.parse_semicolon();
        let data = ArgumentData { argument };
        let data = if is_return {
            NodeData::ReturnStatement(data)
        } else {
            NodeData::ThrowStatement(data)
        };
        self.finish_node(start, data)
    }

    fn parse_break_or_continue(&mut self, is_break: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let label = if self.is_token(SyntaxKind::Identifier) && !self.has_preceding_line_break() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        let data = JumpData { label };
        let data = if is_break {
            NodeData::BreakStatement(data)
        } else {
            NodeData::ContinueStatement(data)
        };
        self.finish_node(start, data)
    }

    /// `label: statement`
    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.finish_node(
            start,
            NodeData::LabeledStatement(LabeledData { label, statement }),
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let block = self.parse_block();

        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let param = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let param = self.parse_binding_target();
                self.parse_expected(SyntaxKind::CloseParenToken);
                param
            } else {
                NodeIndex::NONE
            };
            let body = self.parse_block();
            self.finish_node(
                catch_start,
                NodeData::CatchClause(CatchClauseData { param, body }),
            )
        } else {
            NodeIndex::NONE
        };

        let finalizer = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if handler.is_none() && finalizer.is_none() {
            self.error_at_current_token(
                "'catch' or 'finally' expected.",
                diagnostic_codes::TOKEN_EXPECTED,
            );
        }

        self.finish_node(
            start,
            NodeData::TryStatement(TryStatementData {
                block,
                handler,
                finalizer,
            }),
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let discriminant = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut cases = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let case_start = self.token_pos();
            let test = if self.parse_optional(SyntaxKind::CaseKeyword) {
                self.parse_expression()
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                NodeIndex::NONE
            } else {
                self.error_at_current_token(
                    "'case' or 'default' expected.",
                    diagnostic_codes::TOKEN_EXPECTED,
                );
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let consequent = self.parse_statement_list(&[
                SyntaxKind::CaseKeyword,
                SyntaxKind::DefaultKeyword,
                SyntaxKind::CloseBraceToken,
            ]);
            cases.push(self.finish_node(
                case_start,
                NodeData::SwitchCase(SwitchCaseData { test, consequent }),
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.finish_node(
            start,
            NodeData::SwitchStatement(SwitchStatementData {
                discriminant,
                cases: NodeList::from_vec(cases),
            }),
        )
    }

    // =========================================================================
    // Import and export declarations
    // =========================================================================

    fn parse_module_item(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::ImportKeyword) {
            self.parse_import_declaration()
        } else {
            self.parse_export_declaration()
        }
    }

    /// `import 'm';`, `import a from 'm';`, `import a, * as ns from 'm';`,
    /// `import { a, b as c } from 'm';`
    fn parse_import_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ImportKeyword);
        let import_clause = if self.is_token(SyntaxKind::StringLiteral) {
            NodeIndex::NONE
        } else {
            let clause = self.parse_import_clause();
            self.parse_expected_contextual("from");
            clause
        };
        let module_specifier = self.parse_module_specifier();
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ImportDeclaration(ImportDeclData {
                import_clause,
                module_specifier,
            }),
        )
    }

    fn parse_import_clause(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let named_bindings = if name.is_none() || self.parse_optional(SyntaxKind::CommaToken) {
            match self.token() {
                SyntaxKind::AsteriskToken => self.parse_namespace_import(),
                SyntaxKind::OpenBraceToken => self.parse_named_specifiers(true),
                _ => {
                    self.error_at_current_token(
                        "Identifier expected.",
                        diagnostic_codes::IDENTIFIER_EXPECTED,
                    );
                    NodeIndex::NONE
                }
            }
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::ImportClause(ImportClauseData {
                name,
                named_bindings,
            }),
        )
    }

    /// `* as ns`
    fn parse_namespace_import(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        self.parse_expected_contextual("as");
        let name = self.parse_identifier();
        self.finish_node(
            start,
            NodeData::NamespaceImport(NamedImportsData {
                name,
                elements: NodeList::new(),
            }),
        )
    }

    /// `{ a, b as c, default as d }` in imports or exports.
    fn parse_named_specifiers(&mut self, is_import: bool) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let spec_start = self.token_pos();
            let spec = self.parse_specifier(is_import);
            if spec.is_some() {
                elements.push(spec);
            }
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == spec_start {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let data = NamedImportsData {
            name: NodeIndex::NONE,
            elements: NodeList::from_vec(elements),
        };
        let data = if is_import {
            NodeData::NamedImports(data)
        } else {
            NodeData::NamedExports(data)
        };
        self.finish_node(start, data)
    }

    /// An imported specifier must bind a plain identifier locally; the other
    /// side of `as` may be any identifier name or a string.
    fn parse_specifier(&mut self, is_import: bool) -> NodeIndex {
        let start = self.token_pos();
        let first_is_identifier = self.is_token(SyntaxKind::Identifier);
        let first = self.parse_module_export_name();
        if first.is_none() {
            return NodeIndex::NONE;
        }
        let (property_name, name) = if self.is_contextual("as") {
            self.next_token();
            let name = if is_import {
                self.parse_identifier()
            } else {
                self.parse_module_export_name()
            };
            (first, name)
        } else {
            if is_import && !first_is_identifier {
                let length = self.token_pos().saturating_sub(start);
                self.error_at(
                    start,
                    length,
                    "Identifier expected.",
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
            }
            (NodeIndex::NONE, first)
        };
        let data = SpecifierData {
            property_name,
            name,
        };
        let data = if is_import {
            NodeData::ImportSpecifier(data)
        } else {
            NodeData::ExportSpecifier(data)
        };
        self.finish_node(start, data)
    }

    fn parse_module_export_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            self.parse_string_literal()
        } else {
            self.parse_identifier_name()
        }
    }

    fn parse_module_specifier(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            return self.parse_string_literal();
        }
        self.error_at_current_token(
            "String literal expected.",
            diagnostic_codes::TOKEN_EXPECTED,
        );
        NodeIndex::NONE
    }

    fn parse_expected_contextual(&mut self, word: &str) -> bool {
        if self.is_contextual(word) {
            self.next_token();
            return true;
        }
        let message = format!("'{word}' expected.");
        self.error_at_current_token(&message, diagnostic_codes::TOKEN_EXPECTED);
        false
    }

    /// `export <declaration>`, `export default ...`, `export { a } [from 'm'];`,
    /// `export * [as ns] from 'm';`
    fn parse_export_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ExportKeyword);
        let (export_clause, module_specifier) = match self.token() {
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                return self.parse_export_default(start);
            }
            SyntaxKind::AsteriskToken => {
                let clause = self.parse_namespace_export();
                self.parse_expected_contextual("from");
                let module_specifier = self.parse_module_specifier();
                self.parse_semicolon();
                (clause, module_specifier)
            }
            SyntaxKind::OpenBraceToken => {
                let clause = self.parse_named_specifiers(false);
                let module_specifier = if self.is_contextual("from") {
                    self.next_token();
                    self.parse_module_specifier()
                } else {
                    NodeIndex::NONE
                };
                self.parse_semicolon();
                (clause, module_specifier)
            }
            SyntaxKind::VarKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => (self.parse_statement(), NodeIndex::NONE),
            SyntaxKind::Identifier
                if self.is_let_declaration() || self.is_async_function_start() =>
            {
                (self.parse_statement(), NodeIndex::NONE)
            }
            _ => {
                self.error_at_current_token(
                    "Declaration or statement expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                return NodeIndex::NONE;
            }
        };
        self.finish_node(
            start,
            NodeData::ExportDeclaration(ExportDeclData {
                is_default_export: false,
                export_clause,
                module_specifier,
            }),
        )
    }

    /// `*` or `* as ns`; returns `NONE` for the bare `*`.
    fn parse_namespace_export(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::AsteriskToken);
        if !self.is_contextual("as") {
            return NodeIndex::NONE;
        }
        self.next_token();
        let name = self.parse_module_export_name();
        self.finish_node(
            start,
            NodeData::NamespaceExport(NamedImportsData {
                name,
                elements: NodeList::new(),
            }),
        )
    }

    /// After `export default`: a function or class declaration whose name is
    /// optional, or an expression.
    fn parse_export_default(&mut self, start: u32) -> NodeIndex {
        let declaration = match self.token() {
            SyntaxKind::FunctionKeyword => self.parse_default_function_declaration(),
            SyntaxKind::Identifier if self.is_async_function_start() => {
                self.parse_default_function_declaration()
            }
            SyntaxKind::ClassKeyword => self.parse_class_with_name(true, false),
            _ => {
                let expression = self.parse_assignment_expression();
                self.parse_semicolon();
                return self.finish_node(
                    start,
                    NodeData::ExportAssignment(ExportAssignmentData { expression }),
                );
            }
        };
        self.finish_node(
            start,
            NodeData::ExportDeclaration(ExportDeclData {
                is_default_export: true,
                export_clause: declaration,
                module_specifier: NodeIndex::NONE,
            }),
        )
    }

    fn parse_default_function_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let data = self.parse_function_parts(false);
        self.finish_node(start, NodeData::FunctionDeclaration(data))
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    fn parse_function_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let data = self.parse_function_parts(true);
        self.finish_node(start, NodeData::FunctionDeclaration(data))
    }

    /// `[async] function [*] name (params) { body }`. The name is required for
    /// declarations and optional for expressions.
    pub(crate) fn parse_function_parts(&mut self, name_required: bool) -> FunctionData {
        let is_async = if self.is_contextual("async") {
            self.next_token();
            true
        } else {
            false
        };
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);

        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            if name_required {
                self.error_at_current_token(
                    "Identifier expected.",
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
            }
            NodeIndex::NONE
        };

        let (parameters, body) = self.parse_signature_and_body(is_async, is_generator);
        FunctionData {
            name,
            parameters,
            body,
            is_async,
            is_generator,
        }
    }

    pub(crate) fn parse_signature_and_body(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> (NodeList, NodeIndex) {
        let mut flags = 0;
        if is_async {
            flags |= CONTEXT_FLAG_ASYNC;
        }
        if is_generator {
            flags |= CONTEXT_FLAG_GENERATOR;
        }
        self.with_context(flags, |p| {
            let parameters = p.parse_parameter_list();
            let body = p.parse_block();
            (parameters, body)
        })
    }

    /// `(a, b = 1, { c }, ...rest)`
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        self.parse_expected(SyntaxKind::OpenParenToken);
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            parameters.push(self.parse_binding_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == start {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::from_vec(parameters)
    }

    /// Class declaration (name required) or class expression.
    pub(crate) fn parse_class(&mut self, is_declaration: bool) -> NodeIndex {
        self.parse_class_with_name(is_declaration, is_declaration)
    }

    fn parse_class_with_name(&mut self, is_declaration: bool, name_required: bool) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ClassKeyword);

        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_identifier()
        } else {
            if name_required {
                self.error_at_current_token(
                    "Identifier expected.",
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
            }
            NodeIndex::NONE
        };

        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression()
        } else {
            NodeIndex::NONE
        };

        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let member_start = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == member_start {
                self.error_at_current_token(
                    "Unexpected token. A constructor, method, accessor, or property was expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        let data = ClassData {
            name,
            heritage,
            members: NodeList::from_vec(members),
        };
        let data = if is_declaration {
            NodeData::ClassDeclaration(data)
        } else {
            NodeData::ClassExpression(data)
        };
        self.finish_node(start, data)
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_static = self.is_contextual("static") && self.next_is_member_name();
        if is_static {
            self.next_token();
        }
        let (kind, is_async, is_generator) = self.parse_method_modifiers();

        let (key, computed) = self.parse_property_name();
        if key.is_none() {
            return NodeIndex::NONE;
        }

        if self.is_token(SyntaxKind::OpenParenToken) {
            let kind = if kind == MethodKind::Method
                && !is_static
                && !computed
                && self.arena.get_identifier_text(key) == Some("constructor")
            {
                MethodKind::Constructor
            } else {
                kind
            };
            let (parameters, body) = self.parse_signature_and_body(is_async, is_generator);
            return self.finish_node(
                start,
                NodeData::ClassMethod(MethodData {
                    key,
                    computed,
                    is_static,
                    kind,
                    parameters,
                    body,
                    is_async,
                    is_generator,
                }),
            );
        }

        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.finish_node(
            start,
            NodeData::ClassProperty(ClassPropertyData {
                key,
                computed,
                is_static,
                value,
            }),
        )
    }

    /// `get`/`set`/`async`/`*` prefixes shared by class and object methods.
    /// Each word is a modifier only when a member name follows it.
    pub(crate) fn parse_method_modifiers(&mut self) -> (MethodKind, bool, bool) {
        let mut kind = MethodKind::Method;
        let mut is_async = false;
        if (self.is_contextual("get") || self.is_contextual("set")) && self.next_is_member_name() {
            kind = if self.is_contextual("get") {
                MethodKind::Getter
            } else {
                MethodKind::Setter
            };
            self.next_token();
        } else if self.is_contextual("async") && self.next_is_member_name() {
            let (_, line_break) = self.peek_token();
            if !line_break {
                is_async = true;
                self.next_token();
            }
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        (kind, is_async, is_generator)
    }

    /// The token after the current one can start a property name (or `*`).
    fn next_is_member_name(&mut self) -> bool {
        let (next, _) = self.peek_token();
        next == SyntaxKind::Identifier
            || next.is_keyword()
            || matches!(
                next,
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::AsteriskToken
            )
    }

    /// Property key: identifier or keyword, string, number, or `[expr]`.
    /// Returns the key and whether it is computed.
    pub(crate) fn parse_property_name(&mut self) -> (NodeIndex, bool) {
        match self.token() {
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expr = self.with_context(
                    self.context_flags & !CONTEXT_FLAG_DISALLOW_IN,
                    |p| p.parse_assignment_expression(),
                );
                self.parse_expected(SyntaxKind::CloseBracketToken);
                (expr, true)
            }
            SyntaxKind::StringLiteral => (self.parse_string_literal(), false),
            SyntaxKind::NumericLiteral => (self.parse_numeric_literal(), false),
            kind if kind == SyntaxKind::Identifier || kind.is_keyword() => {
                (self.parse_identifier_name(), false)
            }
            _ => {
                self.error_at_current_token(
                    "Property name expected.",
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                (NodeIndex::NONE, false)
            }
        }
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Binding target with optional default (`a = 1`), or a rest element.
    pub(crate) fn parse_binding_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let argument = self.parse_binding_target();
            return self.finish_node(start, NodeData::RestElement(ArgumentData { argument }));
        }
        let target = self.parse_binding_target();
        self.parse_binding_default(start, target)
    }

    fn parse_binding_default(&mut self, start: u32, target: NodeIndex) -> NodeIndex {
        if !self.parse_optional(SyntaxKind::EqualsToken) {
            return target;
        }
        let right = self.parse_assignment_expression();
        self.finish_node(
            start,
            NodeData::AssignmentPattern(AssignmentPatternData {
                left: target,
                right,
            }),
        )
    }

    /// Identifier, `[...]` or `{...}` pattern.
    pub(crate) fn parse_binding_target(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::Identifier => self.parse_identifier(),
            _ => {
                self.error_at_current_token(
                    "Identifier expected.",
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                NodeIndex::NONE
            }
        }
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::CommaToken) {
                elements.push(NodeIndex::NONE);
                continue;
            }
            let element_start = self.token_pos();
            elements.push(self.parse_binding_element());
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == element_start {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::ArrayPattern(ElementsData {
                elements: NodeList::from_vec(elements),
            }),
        )
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let prop_start = self.token_pos();
            if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let argument = self.parse_binding_target();
                properties.push(
                    self.finish_node(prop_start, NodeData::RestElement(ArgumentData { argument })),
                );
            } else {
                properties.push(self.parse_binding_property(prop_start));
            }
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == prop_start {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::ObjectPattern(PropertiesData {
                properties: NodeList::from_vec(properties),
            }),
        )
    }

    /// `key: target = default` or shorthand `name = default`.
    fn parse_binding_property(&mut self, start: u32) -> NodeIndex {
        let (key, computed) = self.parse_property_name();
        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_binding_element();
            return self.finish_node(
                start,
                NodeData::PropertyAssignment(PropertyData {
                    key,
                    computed,
                    shorthand: false,
                    value,
                }),
            );
        }
        if computed || self.arena.get_identifier_text(key).is_none() {
            self.parse_expected(SyntaxKind::ColonToken);
        }
        let value = self.parse_binding_default(start, key);
        self.finish_node(
            start,
            NodeData::PropertyAssignment(PropertyData {
                key: NodeIndex::NONE,
                computed: false,
                shorthand: true,
                value,
            }),
        )
    }
}
