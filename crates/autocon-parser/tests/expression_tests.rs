//! Tests for expression parsing: precedence, arrows, calls and literals.
use autocon_parser::parser::node::BinaryExprData;
use autocon_parser::{NodeData, NodeIndex, NodeKind, ParserState};
use autocon_scanner::SyntaxKind;

/// Parse `source` as a single expression statement and return the parser
/// together with the expression's index.
fn parse_expression(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.parse_diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parser.parse_diagnostics
    );
    let NodeData::SourceFile(sf) = &parser.arena.get(root).unwrap().data else {
        panic!("expected SourceFile");
    };
    let stmt = sf.statements.nodes[0];
    let NodeData::ExpressionStatement(expr_stmt) = &parser.arena.get(stmt).unwrap().data else {
        panic!("expected ExpressionStatement for {source:?}");
    };
    let expr = expr_stmt.expression;
    (parser, expr)
}

fn binary(parser: &ParserState, index: NodeIndex) -> &BinaryExprData {
    match &parser.arena.get(index).unwrap().data {
        NodeData::BinaryExpression(bin)
        | NodeData::LogicalExpression(bin)
        | NodeData::AssignmentExpression(bin) => bin,
        other => panic!("expected binary-like node, got {other:?}"),
    }
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    // 2 + 2 / 2 * 4 - 5  ==>  (2 + ((2 / 2) * 4)) - 5
    let (parser, expr) = parse_expression("2+2/2*4-5");
    let outer = binary(&parser, expr);
    assert_eq!(outer.operator, SyntaxKind::MinusToken);
    let sum = binary(&parser, outer.left);
    assert_eq!(sum.operator, SyntaxKind::PlusToken);
    let product = binary(&parser, sum.right);
    assert_eq!(product.operator, SyntaxKind::AsteriskToken);
    assert_eq!(
        binary(&parser, product.left).operator,
        SyntaxKind::SlashToken
    );
}

#[test]
fn exponent_is_right_associative() {
    let (parser, expr) = parse_expression("a ** b ** c");
    let outer = binary(&parser, expr);
    assert_eq!(parser.arena.kind(outer.left), Some(NodeKind::Identifier));
    assert_eq!(
        binary(&parser, outer.right).operator,
        SyntaxKind::AsteriskAsteriskToken
    );
}

#[test]
fn logical_operators_produce_logical_expressions() {
    let (parser, expr) = parse_expression("a || b && c");
    assert_eq!(parser.arena.kind(expr), Some(NodeKind::LogicalExpression));
    let outer = binary(&parser, expr);
    assert_eq!(outer.operator, SyntaxKind::BarBarToken);
    assert_eq!(
        parser.arena.kind(outer.right),
        Some(NodeKind::LogicalExpression)
    );

    let (parser, expr) = parse_expression("1 === 2");
    assert_eq!(parser.arena.kind(expr), Some(NodeKind::BinaryExpression));
}

#[test]
fn assignment_is_right_associative() {
    let (parser, expr) = parse_expression("a = b += c");
    let outer = binary(&parser, expr);
    assert_eq!(outer.operator, SyntaxKind::EqualsToken);
    assert_eq!(
        binary(&parser, outer.right).operator,
        SyntaxKind::PlusEqualsToken
    );
}

#[test]
fn conditional_and_sequence() {
    let (parser, expr) = parse_expression("a ? b : c");
    assert_eq!(
        parser.arena.kind(expr),
        Some(NodeKind::ConditionalExpression)
    );

    let (parser, expr) = parse_expression("a, b, c");
    let NodeData::SequenceExpression(seq) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected sequence");
    };
    assert_eq!(seq.expressions.len(), 3);
}

#[test]
fn arrow_functions() {
    for (source, is_async, params) in [
        ("x => x", false, 1),
        ("(a, b) => { return a; }", false, 2),
        ("() => ({})", false, 0),
        ("async x => await x", true, 1),
        ("async ({ a }, [b]) => a", true, 2),
    ] {
        let (parser, expr) = parse_expression(source);
        let NodeData::ArrowFunction(arrow) = &parser.arena.get(expr).unwrap().data else {
            panic!("expected arrow for {source:?}");
        };
        assert_eq!(arrow.is_async, is_async, "{source}");
        assert_eq!(arrow.parameters.len(), params, "{source}");
    }
}

#[test]
fn parenthesized_expression_is_not_an_arrow() {
    let (parser, expr) = parse_expression("(a, b)");
    assert_eq!(
        parser.arena.kind(expr),
        Some(NodeKind::ParenthesizedExpression)
    );
    assert_eq!(
        parser.arena.kind(parser.arena.skip_parentheses(expr)),
        Some(NodeKind::SequenceExpression)
    );
}

#[test]
fn call_and_member_chains() {
    let (parser, expr) = parse_expression("console.log(a)[0].default(...rest)");
    let NodeData::CallExpression(call) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected call");
    };
    assert_eq!(call.arguments.len(), 1);
    assert_eq!(
        parser.arena.kind(call.arguments.nodes[0]),
        Some(NodeKind::SpreadElement)
    );
    let NodeData::MemberExpression(member) = &parser.arena.get(call.callee).unwrap().data else {
        panic!("expected member");
    };
    assert!(!member.computed);
    assert_eq!(parser.arena.get_identifier_text(member.property), Some("default"));
}

#[test]
fn optional_chains() {
    let (parser, expr) = parse_expression("a?.b.c?.[d]?.(e)");
    let call_node = parser.arena.get(expr).unwrap();
    assert!(call_node.is_optional_chain());
    let NodeData::CallExpression(call) = &call_node.data else {
        panic!("expected call");
    };
    let NodeData::MemberExpression(index) = &parser.arena.get(call.callee).unwrap().data else {
        panic!("expected element access");
    };
    assert!(index.computed && index.question_dot_token);
    let NodeData::MemberExpression(plain) = &parser.arena.get(index.object).unwrap().data else {
        panic!("expected property access");
    };
    assert!(!plain.question_dot_token);
    let NodeData::MemberExpression(first) = &parser.arena.get(plain.object).unwrap().data else {
        panic!("expected property access");
    };
    assert!(first.question_dot_token);
    assert_eq!(parser.arena.get_identifier_text(first.property), Some("b"));

    let (parser, expr) = parse_expression("f(x)");
    assert!(!parser.arena.get(expr).unwrap().is_optional_chain());

    let mut parser = ParserState::new("test.js".to_string(), "new a?.b();".to_string());
    parser.parse_source_file();
    assert_eq!(parser.parse_diagnostics[0].code, 1109);
}

#[test]
fn conditional_with_leading_dot_number_is_not_a_chain() {
    let (parser, expr) = parse_expression("a?.5:b");
    assert_eq!(
        parser.arena.kind(expr),
        Some(NodeKind::ConditionalExpression)
    );
}

#[test]
fn new_with_and_without_arguments() {
    let (parser, expr) = parse_expression("new Foo.Bar(1).baz");
    let NodeData::MemberExpression(member) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected member");
    };
    assert_eq!(parser.arena.kind(member.object), Some(NodeKind::NewExpression));

    let (parser, expr) = parse_expression("new Foo");
    let NodeData::NewExpression(new_expr) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected new");
    };
    assert!(new_expr.arguments.is_empty());
}

#[test]
fn unary_and_update_expressions() {
    let (parser, expr) = parse_expression("typeof -x");
    let NodeData::UnaryExpression(unary) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected unary");
    };
    assert_eq!(unary.operator, SyntaxKind::TypeOfKeyword);

    let (parser, expr) = parse_expression("i++");
    let NodeData::UpdateExpression(update) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected update");
    };
    assert!(!update.prefix);
}

#[test]
fn object_literal_members() {
    let (parser, expr) =
        parse_expression("({ a: 1, b, [c]: 2, 'd': 3, get e() { return 1; }, f() {}, ...g })");
    let inner = parser.arena.skip_parentheses(expr);
    let NodeData::ObjectLiteral(obj) = &parser.arena.get(inner).unwrap().data else {
        panic!("expected object literal");
    };
    let kinds: Vec<NodeKind> = obj
        .properties
        .iter()
        .map(|p| parser.arena.kind(p).unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::PropertyAssignment,
            NodeKind::ObjectMethod,
            NodeKind::ObjectMethod,
            NodeKind::SpreadElement,
        ]
    );
    let second = parser.arena.get(obj.properties.nodes[1]).unwrap();
    let NodeData::PropertyAssignment(shorthand) = &second.data else {
        panic!("expected property");
    };
    assert!(shorthand.shorthand);
    assert!(shorthand.key.is_none());
    assert_eq!(parser.arena.get_identifier_text(shorthand.value), Some("b"));
}

#[test]
fn array_literal_with_holes() {
    let (parser, expr) = parse_expression("[1, , 3]");
    let NodeData::ArrayLiteral(array) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected array");
    };
    assert_eq!(array.elements.len(), 3);
    assert!(array.elements.nodes[1].is_none());
}

#[test]
fn string_literal_keeps_raw_and_cooked_text() {
    let (parser, expr) = parse_expression(r#"'a\'b'"#);
    let NodeData::StringLiteral(lit) = &parser.arena.get(expr).unwrap().data else {
        panic!("expected string");
    };
    assert_eq!(lit.raw, r#"'a\'b'"#);
    assert_eq!(lit.value, "a'b");
}

#[test]
fn keywords_are_valid_property_names() {
    let (parser, expr) = parse_expression("a.class.new");
    assert_eq!(parser.arena.kind(expr), Some(NodeKind::MemberExpression));
}
