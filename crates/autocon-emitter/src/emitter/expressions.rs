use super::Printer;
use autocon_parser::{NodeIndex, NodeList};
use autocon_parser::parser::node::{
    BinaryExprData, CallExpressionData, ConditionalExpressionData, MemberExpressionData, NodeData,
    PropertyData, UnaryExpressionData, UpdateExpressionData, YieldExpressionData,
};
use autocon_scanner::SyntaxKind;

impl<'a> Printer<'a> {
    // =========================================================================
    // Expressions
    // =========================================================================

    pub(super) fn emit_binary_expression(&mut self, binary: &BinaryExprData) {
        self.emit(binary.left);
        self.write_space();
        self.write(binary.operator.text());
        self.write_space();
        self.emit(binary.right);
    }

    pub(super) fn emit_conditional_expression(&mut self, cond: &ConditionalExpressionData) {
        self.emit(cond.test);
        self.write(" ? ");
        self.emit(cond.consequent);
        self.write(" : ");
        self.emit(cond.alternate);
    }

    pub(super) fn emit_unary_expression(&mut self, unary: &UnaryExpressionData) {
        self.write(unary.operator.text());
        if unary.operator.is_keyword()
            || self.needs_space_after_sign(unary.operator, unary.argument)
        {
            self.write_space();
        }
        self.emit(unary.argument);
    }

    /// `- -x` and `+ ++x` must not collapse into `--x` / `+++x`.
    fn needs_space_after_sign(&self, operator: SyntaxKind, argument: NodeIndex) -> bool {
        let sign = match operator {
            SyntaxKind::PlusToken => SyntaxKind::PlusToken,
            SyntaxKind::MinusToken => SyntaxKind::MinusToken,
            _ => return false,
        };
        let inner = match self.arena.get(argument).map(|n| &n.data) {
            Some(NodeData::UnaryExpression(inner)) => inner.operator,
            Some(NodeData::UpdateExpression(inner)) if inner.prefix => inner.operator,
            _ => return false,
        };
        matches!(
            (sign, inner),
            (SyntaxKind::PlusToken, SyntaxKind::PlusToken | SyntaxKind::PlusPlusToken)
                | (
                    SyntaxKind::MinusToken,
                    SyntaxKind::MinusToken | SyntaxKind::MinusMinusToken
                )
        )
    }

    pub(super) fn emit_update_expression(&mut self, update: &UpdateExpressionData) {
        if update.prefix {
            self.write(update.operator.text());
            self.emit(update.argument);
        } else {
            self.emit(update.argument);
            self.write(update.operator.text());
        }
    }

    /// Shared by calls and `new` (the caller writes the `new ` prefix).
    pub(super) fn emit_call_expression(&mut self, call: &CallExpressionData, optional: bool) {
        self.emit(call.callee);
        if optional {
            self.write("?.");
        }
        self.emit_parameters(&call.arguments);
    }

    pub(super) fn emit_member_expression(&mut self, member: &MemberExpressionData) {
        self.emit(member.object);
        if member.question_dot_token {
            self.write("?.");
        }
        if member.computed {
            self.write("[");
            self.emit(member.property);
            self.write("]");
        } else {
            if !member.question_dot_token {
                self.write(".");
            }
            self.emit(member.property);
        }
    }

    pub(super) fn emit_yield_expression(&mut self, expr: &YieldExpressionData) {
        self.write("yield");
        if expr.delegate {
            self.write("*");
        }
        self.emit_optional_with_space(expr.argument);
    }

    // =========================================================================
    // Literals
    // =========================================================================

    /// `[a, , b]`; a trailing hole needs an extra comma to survive.
    pub(super) fn emit_array_elements(&mut self, elements: &NodeList) {
        self.write("[");
        for (i, &idx) in elements.nodes.iter().enumerate() {
            if i > 0 {
                self.write(",");
                if idx.is_some() {
                    self.write_space();
                }
            }
            self.emit(idx);
        }
        if elements.nodes.last().is_some_and(|last| last.is_none()) {
            self.write(",");
        }
        self.write("]");
    }

    pub(super) fn emit_object_properties(&mut self, properties: &NodeList) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        self.emit_comma_list(properties);
        self.write(" }");
    }

    pub(super) fn emit_property_assignment(&mut self, prop: &PropertyData) {
        if prop.shorthand {
            self.emit(prop.value);
            return;
        }
        self.emit_property_key(prop.key, prop.computed);
        self.write(": ");
        self.emit(prop.value);
    }

    pub(super) fn emit_property_key(&mut self, key: NodeIndex, computed: bool) {
        if computed {
            self.write("[");
            self.emit(key);
            self.write("]");
        } else {
            self.emit(key);
        }
    }
}
