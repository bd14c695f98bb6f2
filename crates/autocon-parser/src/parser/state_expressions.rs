//! Parser state - expression parsing.

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, ParserState,
};
use autocon_common::diagnostics::diagnostic_codes;
use autocon_scanner::SyntaxKind;

/// Binding power of a binary operator; 0 means "not a binary operator".
fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::BarBarToken | SyntaxKind::QuestionQuestionToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::BarToken => 3,
        SyntaxKind::CaretToken => 4,
        SyntaxKind::AmpersandToken => 5,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 6,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 7,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        SyntaxKind::AsteriskAsteriskToken => 11,
        _ => 0,
    }
}

fn is_logical_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::AmpersandAmpersandToken
            | SyntaxKind::BarBarToken
            | SyntaxKind::QuestionQuestionToken
    )
}

/// Tokens that close an enclosing construct; an error recovery never
/// consumes them so the enclosing list can terminate.
fn is_list_terminator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EndOfFileToken
    )
}

impl ParserState {
    // =========================================================================
    // Comma, assignment and conditional expressions
    // =========================================================================

    /// `a, b, c`
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let first = self.parse_assignment_expression();
        if !self.is_token(SyntaxKind::CommaToken) || first.is_none() {
            return first;
        }
        let mut expressions = vec![first];
        while self.parse_optional(SyntaxKind::CommaToken) {
            let expr = self.parse_assignment_expression();
            if expr.is_none() {
                break;
            }
            expressions.push(expr);
        }
        self.finish_node(
            start,
            NodeData::SequenceExpression(SequenceExpressionData {
                expressions: NodeList::from_vec(expressions),
            }),
        )
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_nesting() {
            return NodeIndex::NONE;
        }
        let expr = self.parse_assignment_expression_worker();
        self.exit_nesting();
        expr
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if self.is_contextual("yield") && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }
        if let Some(is_async) = self.arrow_function_start() {
            return self.parse_arrow_function(is_async);
        }

        let start = self.token_pos();
        let left = self.parse_conditional_expression();
        let operator = self.token();
        if left.is_none() || !operator.is_assignment_operator() {
            return left;
        }
        self.next_token();
        let right = self.parse_assignment_expression();
        self.finish_node(
            start,
            NodeData::AssignmentExpression(BinaryExprData {
                operator,
                left,
                right,
            }),
        )
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let test = self.parse_binary_expression(0);
        if test.is_none() || !self.parse_optional(SyntaxKind::QuestionToken) {
            return test;
        }
        let consequent = self.with_context(self.context_flags & !CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_assignment_expression()
        });
        self.parse_expected(SyntaxKind::ColonToken);
        let alternate = self.parse_assignment_expression();
        self.finish_node(
            start,
            NodeData::ConditionalExpression(ConditionalExpressionData {
                test,
                consequent,
                alternate,
            }),
        )
    }

    /// Precedence climbing over [`binary_precedence`]. `**` is right
    /// associative; everything else groups to the left.
    fn parse_binary_expression(&mut self, precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression();
        if left.is_none() {
            return left;
        }
        loop {
            let operator = self.token();
            if operator == SyntaxKind::InKeyword && self.in_context(CONTEXT_FLAG_DISALLOW_IN) {
                break;
            }
            let new_precedence = binary_precedence(operator);
            if new_precedence == 0 {
                break;
            }
            let consume = if operator == SyntaxKind::AsteriskAsteriskToken {
                new_precedence >= precedence
            } else {
                new_precedence > precedence
            };
            if !consume {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(new_precedence);
            let data = BinaryExprData {
                operator,
                left,
                right,
            };
            let data = if is_logical_operator(operator) {
                NodeData::LogicalExpression(data)
            } else {
                NodeData::BinaryExpression(data)
            };
            left = self.finish_node(start, data);
        }
        left
    }

    // =========================================================================
    // Unary and update expressions
    // =========================================================================

    fn parse_unary_expression(&mut self) -> NodeIndex {
        if !self.enter_nesting() {
            return NodeIndex::NONE;
        }
        let expr = self.parse_unary_expression_worker();
        self.exit_nesting();
        expr
    }

    fn parse_unary_expression_worker(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let operator = self.token();
        match operator {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                self.next_token();
                let argument = self.parse_unary_expression();
                self.finish_node(
                    start,
                    NodeData::UnaryExpression(UnaryExpressionData { operator, argument }),
                )
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token();
                let argument = self.parse_unary_expression();
                self.finish_node(
                    start,
                    NodeData::UpdateExpression(UpdateExpressionData {
                        operator,
                        prefix: true,
                        argument,
                    }),
                )
            }
            SyntaxKind::Identifier
                if self.is_contextual("await") && self.in_context(CONTEXT_FLAG_ASYNC) =>
            {
                self.next_token();
                let argument = self.parse_unary_expression();
                self.finish_node(start, NodeData::AwaitExpression(ArgumentData { argument }))
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let argument = self.parse_left_hand_side_expression();
        let operator = self.token();
        if argument.is_some()
            && matches!(
                operator,
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
            )
            && !self.has_preceding_line_break()
        {
            self.next_token();
            return self.finish_node(
                start,
                NodeData::UpdateExpression(UpdateExpressionData {
                    operator,
                    prefix: false,
                    argument,
                }),
            );
        }
        argument
    }

    // =========================================================================
    // Calls, member access and `new`
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expr = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if expr.is_none() {
            return expr;
        }
        self.parse_member_expression_rest(start, expr, true)
    }

    /// `new C(args)`; the argument list is optional (`new C`).
    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.is_token(SyntaxKind::DotToken) {
            self.error_at_current_token(
                "'new.target' is not supported.",
                diagnostic_codes::UNSUPPORTED_SYNTAX,
            );
        }
        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let callee = if callee.is_some() {
            self.parse_member_expression_rest(callee_start, callee, false)
        } else {
            callee
        };
        if self.is_token(SyntaxKind::QuestionDotToken) {
            self.error_at_current_token(
                "Invalid optional chain from new expression.",
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
        }
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_arguments()
        } else {
            NodeList::new()
        };
        self.finish_node(
            start,
            NodeData::NewExpression(CallExpressionData { callee, arguments }),
        )
    }

    fn parse_member_expression_rest(
        &mut self,
        start: u32,
        mut expr: NodeIndex,
        allow_call: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let property = self.parse_identifier_name();
                    expr = self.finish_node(
                        start,
                        NodeData::MemberExpression(MemberExpressionData {
                            object: expr,
                            property,
                            computed: false,
                            question_dot_token: false,
                        }),
                    );
                }
                // Optional chaining: expr?.prop, expr?.[index], expr?.()
                SyntaxKind::QuestionDotToken if allow_call => {
                    self.next_token();
                    expr = self.parse_optional_chain_link(start, expr);
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let property = self
                        .with_context(self.context_flags & !CONTEXT_FLAG_DISALLOW_IN, |p| {
                            p.parse_expression()
                        });
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    expr = self.finish_node(
                        start,
                        NodeData::MemberExpression(MemberExpressionData {
                            object: expr,
                            property,
                            computed: true,
                            question_dot_token: false,
                        }),
                    );
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let arguments = self.parse_arguments();
                    expr = self.finish_node(
                        start,
                        NodeData::CallExpression(CallExpressionData {
                            callee: expr,
                            arguments,
                        }),
                    );
                }
                _ => return expr,
            }
        }
    }

    /// The link after `?.`; the `?.` itself is already consumed.
    fn parse_optional_chain_link(&mut self, start: u32, expr: NodeIndex) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenParenToken => {
                let arguments = self.parse_arguments();
                let call = self.finish_node(
                    start,
                    NodeData::CallExpression(CallExpressionData {
                        callee: expr,
                        arguments,
                    }),
                );
                if let Some(node) = self.arena.get_mut(call) {
                    node.flags |= NodeFlags::OPTIONAL_CHAIN;
                }
                call
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let property = self
                    .with_context(self.context_flags & !CONTEXT_FLAG_DISALLOW_IN, |p| {
                        p.parse_expression()
                    });
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.finish_node(
                    start,
                    NodeData::MemberExpression(MemberExpressionData {
                        object: expr,
                        property,
                        computed: true,
                        question_dot_token: true,
                    }),
                )
            }
            _ => {
                let property = self.parse_identifier_name();
                self.finish_node(
                    start,
                    NodeData::MemberExpression(MemberExpressionData {
                        object: expr,
                        property,
                        computed: false,
                        question_dot_token: true,
                    }),
                )
            }
        }
    }

    /// `(a, ...b)`
    fn parse_arguments(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        let arguments = self.with_context(flags, |p| {
            let mut arguments = Vec::new();
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let arg = p.parse_spread_or_assignment();
                if arg.is_none() {
                    break;
                }
                arguments.push(arg);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            arguments
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::from_vec(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let argument = self.parse_assignment_expression();
            return self.finish_node(start, NodeData::SpreadElement(ArgumentData { argument }));
        }
        self.parse_assignment_expression()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier if self.is_async_function_start() => {
                self.parse_function_expression()
            }
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::NumericLiteral => self.parse_numeric_literal(),
            SyntaxKind::StringLiteral => self.parse_string_literal(),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                let value = self.is_token(SyntaxKind::TrueKeyword);
                self.next_token();
                self.finish_node(start, NodeData::BooleanLiteral(BooleanLiteralData { value }))
            }
            SyntaxKind::NullKeyword => {
                self.next_token();
                self.finish_node(start, NodeData::NullLiteral)
            }
            SyntaxKind::ThisKeyword => {
                self.next_token();
                self.finish_node(start, NodeData::ThisExpression)
            }
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(start, NodeData::Super)
            }
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::ClassKeyword => self.parse_class(false),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.error_at_current_token(
                    "Regular expression literals are not supported.",
                    diagnostic_codes::UNSUPPORTED_SYNTAX,
                );
                self.next_token();
                NodeIndex::NONE
            }
            kind => {
                self.error_at_current_token(
                    "Expression expected.",
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                if !is_list_terminator(kind) {
                    self.next_token();
                }
                NodeIndex::NONE
            }
        }
    }

    /// `import(specifier)` or `import.meta`. The call and member parts are
    /// left to `parse_member_expression_rest`; only the keyword is consumed.
    fn parse_import_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let import = self.finish_node(start, NodeData::Import);
        match self.token() {
            SyntaxKind::OpenParenToken => import,
            SyntaxKind::DotToken => {
                let (next, _) = self.peek_token();
                if next != SyntaxKind::Identifier {
                    self.error_at_current_token(
                        "'meta' expected.",
                        diagnostic_codes::TOKEN_EXPECTED,
                    );
                }
                import
            }
            _ => {
                self.error_at_current_token("'(' expected.", diagnostic_codes::TOKEN_EXPECTED);
                import
            }
        }
    }

    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::Identifier) {
            self.error_at_current_token(
                "Identifier expected.",
                diagnostic_codes::IDENTIFIER_EXPECTED,
            );
            return NodeIndex::NONE;
        }
        self.parse_identifier_name()
    }

    /// Identifier or reserved word, as allowed after `.` and in property keys.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        let kind = self.token();
        if kind != SyntaxKind::Identifier && !kind.is_keyword() {
            self.error_at_current_token(
                "Identifier expected.",
                diagnostic_codes::IDENTIFIER_EXPECTED,
            );
            return NodeIndex::NONE;
        }
        let start = self.token_pos();
        let name = self.token_value().to_string();
        self.next_token();
        self.finish_node(start, NodeData::Identifier(IdentifierData { name }))
    }

    pub(crate) fn parse_numeric_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let raw = self.token_value().to_string();
        self.next_token();
        self.finish_node(start, NodeData::NumericLiteral(NumericLiteralData { raw }))
    }

    pub(crate) fn parse_string_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let raw = self.scanner.token_text().to_string();
        let value = self.token_value().to_string();
        self.next_token();
        self.finish_node(
            start,
            NodeData::StringLiteral(StringLiteralData { raw, value }),
        )
    }

    fn parse_parenthesized_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let expression = self.with_context(self.context_flags & !CONTEXT_FLAG_DISALLOW_IN, |p| {
            p.parse_expression()
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(
            start,
            NodeData::ParenthesizedExpression(ParenthesizedExpressionData { expression }),
        )
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        let elements = self.with_context(flags, |p| {
            let mut elements = Vec::new();
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.parse_optional(SyntaxKind::CommaToken) {
                    elements.push(NodeIndex::NONE);
                    continue;
                }
                let element = p.parse_spread_or_assignment();
                if element.is_none() {
                    break;
                }
                elements.push(element);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            elements
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(
            start,
            NodeData::ArrayLiteral(ElementsData {
                elements: NodeList::from_vec(elements),
            }),
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        let properties = self.with_context(flags, |p| {
            let mut properties = Vec::new();
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let prop_start = p.token_pos();
                let prop = p.parse_object_literal_member();
                if prop.is_some() {
                    properties.push(prop);
                }
                if !p.parse_optional(SyntaxKind::CommaToken) || p.token_pos() == prop_start {
                    break;
                }
            }
            properties
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            start,
            NodeData::ObjectLiteral(PropertiesData {
                properties: NodeList::from_vec(properties),
            }),
        )
    }

    fn parse_object_literal_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let argument = self.parse_assignment_expression();
            return self.finish_node(start, NodeData::SpreadElement(ArgumentData { argument }));
        }

        let (kind, is_async, is_generator) = self.parse_method_modifiers();
        let (key, computed) = self.parse_property_name();
        if key.is_none() {
            return NodeIndex::NONE;
        }

        if self.is_token(SyntaxKind::OpenParenToken) {
            let (parameters, body) = self.parse_signature_and_body(is_async, is_generator);
            return self.finish_node(
                start,
                NodeData::ObjectMethod(MethodData {
                    key,
                    computed,
                    is_static: false,
                    kind,
                    parameters,
                    body,
                    is_async,
                    is_generator,
                }),
            );
        }
        if kind != MethodKind::Method || is_async || is_generator {
            self.parse_expected(SyntaxKind::OpenParenToken);
            return NodeIndex::NONE;
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression();
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

        // Shorthand `{ a }`, or `{ a = 1 }` as the target of a destructuring
        // assignment.
        if computed || self.arena.get_identifier_text(key).is_none() {
            self.parse_expected(SyntaxKind::ColonToken);
            return NodeIndex::NONE;
        }
        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            let right = self.parse_assignment_expression();
            self.finish_node(
                start,
                NodeData::AssignmentPattern(AssignmentPatternData { left: key, right }),
            )
        } else {
            key
        };
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

    fn parse_function_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let data = self.parse_function_parts(false);
        self.finish_node(start, NodeData::FunctionExpression(data))
    }

    // =========================================================================
    // Arrow functions and yield
    // =========================================================================

    /// Decide whether the current token starts an arrow function. Returns
    /// `Some(is_async)` when it does.
    fn arrow_function_start(&mut self) -> Option<bool> {
        match self.token() {
            SyntaxKind::Identifier if self.is_contextual("async") => {
                let is_async_arrow = self.look_ahead(|p| {
                    p.next_token();
                    if p.has_preceding_line_break() {
                        return false;
                    }
                    p.is_arrow_head()
                });
                if is_async_arrow {
                    Some(true)
                } else if self.is_arrow_head() {
                    Some(false)
                } else {
                    None
                }
            }
            SyntaxKind::Identifier | SyntaxKind::OpenParenToken => {
                self.is_arrow_head().then_some(false)
            }
            _ => None,
        }
    }

    /// `x =>` or a balanced `( ... ) =>` starting at the current token.
    fn is_arrow_head(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.is_token(SyntaxKind::Identifier) {
                p.next_token();
                return p.is_token(SyntaxKind::EqualsGreaterThanToken)
                    && !p.has_preceding_line_break();
            }
            if !p.is_token(SyntaxKind::OpenParenToken) {
                return false;
            }
            let mut depth = 0u32;
            loop {
                match p.token() {
                    SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken => depth += 1,
                    SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken => {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            break;
                        }
                    }
                    SyntaxKind::EndOfFileToken => return false,
                    _ => {}
                }
                p.next_token();
            }
            if !p.is_token(SyntaxKind::CloseParenToken) {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::EqualsGreaterThanToken) && !p.has_preceding_line_break()
        })
    }

    fn parse_arrow_function(&mut self, is_async: bool) -> NodeIndex {
        let start = self.token_pos();
        if is_async {
            self.next_token();
        }
        let flags = if is_async { CONTEXT_FLAG_ASYNC } else { 0 };
        self.with_context(flags, |p| {
            let parameters = if p.is_token(SyntaxKind::Identifier) {
                NodeList::from_vec(vec![p.parse_identifier()])
            } else {
                p.parse_parameter_list()
            };
            p.parse_expected(SyntaxKind::EqualsGreaterThanToken);
            let body = if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_block()
            } else {
                p.parse_assignment_expression()
            };
            p.finish_node(
                start,
                NodeData::ArrowFunction(ArrowFunctionData {
                    parameters,
                    body,
                    is_async,
                }),
            )
        })
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        if self.has_preceding_line_break() {
            return self.finish_node(
                start,
                NodeData::YieldExpression(YieldExpressionData {
                    argument: NodeIndex::NONE,
                    delegate: false,
                }),
            );
        }
        let delegate = self.parse_optional(SyntaxKind::AsteriskToken);
        let argument = if delegate || !is_list_terminator(self.token()) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            start,
            NodeData::YieldExpression(YieldExpressionData { argument, delegate }),
        )
    }
}
