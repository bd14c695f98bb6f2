//! Parser state: token handling, diagnostics and the source-file entry point.

use super::ParseDiagnostic;
use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, NodeData, SourceFileData};
use autocon_common::diagnostics::{diagnostic_codes, format_message};
use autocon_common::limits::{MAX_PARSE_DEPTH, NODES_PER_SOURCE_BYTE_DIVISOR};
use autocon_scanner::{ScannerSnapshot, ScannerState, SyntaxKind};
use tracing::debug;

/// Inside an `async` function body: `await` is an operator.
pub(crate) const CONTEXT_FLAG_ASYNC: u8 = 1 << 0;
/// Inside a generator body: `yield` is an operator.
pub(crate) const CONTEXT_FLAG_GENERATOR: u8 = 1 << 1;
/// Parsing a `for` head initializer: `in` ends the expression.
pub(crate) const CONTEXT_FLAG_DISALLOW_IN: u8 = 1 << 2;

pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    pub parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) context_flags: u8,
    /// End of the most recently consumed token
    pub(crate) prev_token_end: u32,
    /// Current nesting depth for stack overflow protection
    pub(crate) depth: u32,
    /// Position of the last reported error, to avoid cascades at one spot
    last_error_pos: Option<u32>,
}

/// Saved parser position for speculative lookahead.
pub(crate) struct ParserSnapshot {
    scanner: ScannerSnapshot,
    prev_token_end: u32,
    diagnostic_count: usize,
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(file_name: String, source: String) -> ParserState {
        let capacity = source.len() / NODES_PER_SOURCE_BYTE_DIVISOR + 1;
        let mut scanner = ScannerState::new(source);
        scanner.scan();
        ParserState {
            file_name,
            scanner,
            arena: NodeArena::with_capacity(capacity),
            parse_diagnostics: Vec::new(),
            context_flags: 0,
            prev_token_end: 0,
            depth: 0,
            last_error_pos: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source_text(&self) -> &str {
        self.scanner.source_text()
    }

    pub fn has_errors(&self) -> bool {
        !self.parse_diagnostics.is_empty()
    }

    /// Parse the whole input and return the `SourceFile` node. Import and
    /// export declarations are accepted at the top level.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let stmt = self.parse_top_level_statement();
            if stmt.is_some() {
                statements.push(stmt);
            }
            // Guarantee progress on input no rule accepts.
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.error_at_current_token(
                    "Declaration or statement expected.",
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }

        self.collect_scan_errors();
        let end = self.scanner.token_end();
        let root = self.arena.add(
            0,
            end,
            NodeData::SourceFile(SourceFileData {
                file_name: self.file_name.clone(),
                statements: NodeList::from_vec(statements),
            }),
        );
        self.check_tree_depth(root);
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    /// Left-nested chains (`a + b + c`, `a.b.c`, `f()()`) are built in
    /// loops and never pass through [`enter_nesting`](Self::enter_nesting),
    /// so the finished tree is measured once more. Anything deeper than
    /// `MAX_PARSE_DEPTH` is reported at its deepest node.
    fn check_tree_depth(&mut self, root: NodeIndex) {
        let already_reported = self
            .parse_diagnostics
            .iter()
            .any(|d| d.code == diagnostic_codes::NESTING_TOO_DEEP);
        if already_reported {
            return;
        }
        let mut stack = vec![(root, 0u32)];
        while let Some((idx, depth)) = stack.pop() {
            if depth > MAX_PARSE_DEPTH {
                if let Some(node) = self.arena.get(idx) {
                    let (start, length) = (node.pos, node.end.saturating_sub(node.pos));
                    self.error_at(
                        start,
                        length,
                        "Expression or statement nesting is too deep.",
                        diagnostic_codes::NESTING_TOO_DEEP,
                    );
                }
                return;
            }
            stack.extend(
                self.arena
                    .get_children(idx)
                    .into_iter()
                    .map(|child| (child, depth + 1)),
            );
        }
    }

    fn collect_scan_errors(&mut self) {
        for err in self.scanner.take_errors() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: err.pos,
                length: err.length,
                message: err.message.to_string(),
                code: err.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    pub(crate) fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    /// Current token is the identifier `word` (a contextual keyword).
    pub(crate) fn is_contextual(&self, word: &str) -> bool {
        self.is_token(SyntaxKind::Identifier) && self.token_value() == word
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.scanner.scan()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current_token(
            &format_message("'{0}' expected.", &[kind.text()]),
            diagnostic_codes::TOKEN_EXPECTED,
        );
        false
    }

    /// Automatic semicolon insertion: a statement may end before `}`, at end
    /// of file, or before a token on a new line.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) || self.can_parse_semicolon() {
            return;
        }
        self.parse_expected(SyntaxKind::SemicolonToken);
    }

    pub(crate) fn in_context(&self, flag: u8) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with the context flags replaced, restoring them afterwards.
    pub(crate) fn with_context<T>(&mut self, flags: u8, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context_flags;
        self.context_flags = flags;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    // =========================================================================
    // Lookahead
    // =========================================================================

    pub(crate) fn save_state(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            prev_token_end: self.prev_token_end,
            diagnostic_count: self.parse_diagnostics.len(),
            last_error_pos: self.last_error_pos,
        }
    }

    pub(crate) fn restore_state(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.prev_token_end = snapshot.prev_token_end;
        self.parse_diagnostics.truncate(snapshot.diagnostic_count);
        self.last_error_pos = snapshot.last_error_pos;
    }

    /// Evaluate `f` speculatively; the parser position is always restored.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.save_state();
        let result = f(self);
        self.restore_state(snapshot);
        result
    }

    /// Kind of the token after the current one, and whether a line break
    /// separates them.
    pub(crate) fn peek_token(&mut self) -> (SyntaxKind, bool) {
        self.look_ahead(|p| {
            let kind = p.next_token();
            (kind, p.has_preceding_line_break())
        })
    }

    // =========================================================================
    // Node construction and diagnostics
    // =========================================================================

    /// Add a node spanning from `start` to the end of the last consumed token.
    pub(crate) fn finish_node(&mut self, start: u32, data: NodeData) -> NodeIndex {
        let end = self.prev_token_end.max(start);
        self.arena.add(start, end, data)
    }

    pub(crate) fn error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.scanner.token_end().saturating_sub(start);
        self.error_at(start, length, message, code);
    }

    /// Enter one nesting level. Returns false when the input nests deeper
    /// than the parser is willing to recurse; the rest of the input is then
    /// skipped so every enclosing loop terminates.
    pub(crate) fn enter_nesting(&mut self) -> bool {
        if self.depth >= MAX_PARSE_DEPTH {
            self.error_at_current_token(
                "Expression or statement nesting is too deep.",
                diagnostic_codes::NESTING_TOO_DEEP,
            );
            while !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn exit_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
