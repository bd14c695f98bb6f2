//! Tests for statement parsing in the parser.
use autocon_parser::parser::node::{MethodKind, VariableKind};
use autocon_common::diagnostics::diagnostic_codes;
use autocon_parser::{NodeArena, NodeData, NodeIndex, NodeKind, ParserState};

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    match &arena.get(root).unwrap().data {
        NodeData::SourceFile(sf) => sf.statements.nodes.clone(),
        other => panic!("expected SourceFile, got {other:?}"),
    }
}

fn statement_kinds(source: &str) -> Vec<NodeKind> {
    let (parser, root) = parse_source(source);
    assert!(
        parser.parse_diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        parser.parse_diagnostics
    );
    statements(&parser.arena, root)
        .into_iter()
        .map(|stmt| parser.arena.kind(stmt).unwrap())
        .collect()
}

#[test]
fn parses_control_flow_statements() {
    let kinds = statement_kinds(
        "if (a) b; else c;\n\
         while (x) { y }\n\
         do z(); while (q)\n\
         for (let i = 0; i < 3; i++) {}\n\
         for (const k in o) {}\n\
         for (v of list) {}\n\
         switch (s) { case 1: break; default: t }\n\
         try { a } catch (e) { b } finally { c }\n\
         ;\n\
         debugger;",
    );
    assert_eq!(
        kinds,
        vec![
            NodeKind::IfStatement,
            NodeKind::WhileStatement,
            NodeKind::DoWhileStatement,
            NodeKind::ForStatement,
            NodeKind::ForInStatement,
            NodeKind::ForOfStatement,
            NodeKind::SwitchStatement,
            NodeKind::TryStatement,
            NodeKind::EmptyStatement,
            NodeKind::DebuggerStatement,
        ]
    );
}

#[test]
fn let_is_a_declaration_only_before_a_binding() {
    let (parser, root) = parse_source("let a = 1;\nlet;\nlet [b] = c;");
    assert!(parser.parse_diagnostics.is_empty());
    let stmts = statements(&parser.arena, root);
    match &parser.arena.get(stmts[0]).unwrap().data {
        NodeData::VariableDeclaration(decl) => assert_eq!(decl.kind, VariableKind::Let),
        other => panic!("expected declaration, got {other:?}"),
    }
    assert_eq!(
        parser.arena.kind(stmts[1]),
        Some(NodeKind::ExpressionStatement)
    );
    assert_eq!(
        parser.arena.kind(stmts[2]),
        Some(NodeKind::VariableDeclaration)
    );
}

#[test]
fn async_and_generator_functions() {
    let (parser, root) =
        parse_source("async function f() { await g(); }\nfunction* h() { yield 1; yield* h(); }");
    assert!(parser.parse_diagnostics.is_empty());
    let stmts = statements(&parser.arena, root);
    match &parser.arena.get(stmts[0]).unwrap().data {
        NodeData::FunctionDeclaration(func) => {
            assert!(func.is_async);
            assert!(!func.is_generator);
            assert_eq!(parser.arena.get_identifier_text(func.name), Some("f"));
        }
        other => panic!("expected function, got {other:?}"),
    }
    match &parser.arena.get(stmts[1]).unwrap().data {
        NodeData::FunctionDeclaration(func) => assert!(func.is_generator),
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn class_members() {
    let (parser, root) = parse_source(
        "class A extends B {\n\
           constructor(x) { super(x); }\n\
           static create() {}\n\
           get size() { return 1; }\n\
           set size(v) {}\n\
           async *items() {}\n\
           count = 0;\n\
           [key]() {}\n\
         }",
    );
    assert!(
        parser.parse_diagnostics.is_empty(),
        "{:?}",
        parser.parse_diagnostics
    );
    let stmts = statements(&parser.arena, root);
    let NodeData::ClassDeclaration(class) = &parser.arena.get(stmts[0]).unwrap().data else {
        panic!("expected class");
    };
    assert!(class.heritage.is_some());
    let members: Vec<&NodeData> = class
        .members
        .iter()
        .map(|m| &parser.arena.get(m).unwrap().data)
        .collect();
    assert_eq!(members.len(), 7);
    let method_kinds: Vec<(MethodKind, bool, bool, bool)> = members
        .iter()
        .filter_map(|data| match data {
            NodeData::ClassMethod(m) => Some((m.kind, m.is_static, m.is_async, m.is_generator)),
            _ => None,
        })
        .collect();
    assert_eq!(
        method_kinds,
        vec![
            (MethodKind::Constructor, false, false, false),
            (MethodKind::Method, true, false, false),
            (MethodKind::Getter, false, false, false),
            (MethodKind::Setter, false, false, false),
            (MethodKind::Method, false, true, true),
            (MethodKind::Method, false, false, false),
        ]
    );
    assert!(matches!(members[5], NodeData::ClassProperty(_)));
}

#[test]
fn automatic_semicolon_insertion() {
    let kinds = statement_kinds("a\nb\nreturn\nc");
    assert_eq!(
        kinds,
        vec![
            NodeKind::ExpressionStatement,
            NodeKind::ExpressionStatement,
            NodeKind::ReturnStatement,
            NodeKind::ExpressionStatement,
        ]
    );
}

#[test]
fn destructuring_declarations() {
    let (parser, root) = parse_source("const { a, b: [c, , d = 1], ...rest } = obj;");
    assert!(
        parser.parse_diagnostics.is_empty(),
        "{:?}",
        parser.parse_diagnostics
    );
    let stmts = statements(&parser.arena, root);
    let NodeData::VariableDeclaration(decl) = &parser.arena.get(stmts[0]).unwrap().data else {
        panic!("expected declaration");
    };
    let NodeData::VariableDeclarator(declarator) =
        &parser.arena.get(decl.declarations.nodes[0]).unwrap().data
    else {
        panic!("expected declarator");
    };
    assert_eq!(
        parser.arena.kind(declarator.name),
        Some(NodeKind::ObjectPattern)
    );
}

#[test]
fn recovers_from_malformed_statement() {
    let (parser, root) = parse_source("const x = 1\nconst y = ;\nconst z = 3;");
    let stmts = statements(&parser.arena, root);
    assert!(stmts.len() >= 2);
    assert!(!parser.parse_diagnostics.is_empty());
    assert!(
        parser
            .parse_diagnostics
            .iter()
            .any(|d| d.message == "Expression expected.")
    );
}

#[test]
fn stray_close_brace_reports_statement_expected() {
    let (parser, root) = parse_source("a;\n}\nb;");
    assert_eq!(statements(&parser.arena, root).len(), 2);
    let codes: Vec<u32> = parser.parse_diagnostics.iter().map(|d| d.code).collect();
    assert!(codes.contains(&1109) || codes.contains(&1128), "{codes:?}");
}

#[test]
fn parses_import_declarations() {
    let (parser, root) = parse_source(
        "import 'side-effect';\n\
         import a from 'a';\n\
         import b, * as ns from 'b';\n\
         import { c, d as e, default as f } from 'c';",
    );
    assert!(parser.parse_diagnostics.is_empty(), "{:?}", parser.parse_diagnostics);
    let stmts = statements(&parser.arena, root);
    assert_eq!(stmts.len(), 4);
    assert!(
        stmts
            .iter()
            .all(|&s| parser.arena.kind(s) == Some(NodeKind::ImportDeclaration))
    );

    let NodeData::ImportDeclaration(bare) = &parser.arena.get(stmts[0]).unwrap().data else {
        panic!("expected import");
    };
    assert!(bare.import_clause.is_none());

    let NodeData::ImportDeclaration(with_ns) = &parser.arena.get(stmts[2]).unwrap().data else {
        panic!("expected import");
    };
    let NodeData::ImportClause(clause) = &parser.arena.get(with_ns.import_clause).unwrap().data
    else {
        panic!("expected import clause");
    };
    assert_eq!(parser.arena.get_identifier_text(clause.name), Some("b"));
    assert_eq!(
        parser.arena.kind(clause.named_bindings),
        Some(NodeKind::NamespaceImport)
    );

    let NodeData::ImportDeclaration(named) = &parser.arena.get(stmts[3]).unwrap().data else {
        panic!("expected import");
    };
    let NodeData::ImportClause(clause) = &parser.arena.get(named.import_clause).unwrap().data
    else {
        panic!("expected import clause");
    };
    assert!(clause.name.is_none());
    let NodeData::NamedImports(list) = &parser.arena.get(clause.named_bindings).unwrap().data
    else {
        panic!("expected named imports");
    };
    let locals: Vec<_> = list
        .elements
        .iter()
        .map(|spec| match &parser.arena.get(spec).unwrap().data {
            NodeData::ImportSpecifier(spec) => parser.arena.get_identifier_text(spec.name),
            other => panic!("expected specifier, got {other:?}"),
        })
        .collect();
    assert_eq!(locals, vec![Some("c"), Some("e"), Some("f")]);
}

#[test]
fn parses_export_declarations() {
    let kinds = statement_kinds(
        "export const a = 1;\n\
         export function f() {}\n\
         export class C {}\n\
         export { a, f as g };\n\
         export { x } from 'x';\n\
         export * from 'y';\n\
         export * as z from 'z';\n\
         export default function () {}",
    );
    assert!(kinds.iter().all(|&k| k == NodeKind::ExportDeclaration));
    assert_eq!(kinds.len(), 8);

    let (parser, root) = parse_source("export default a + b;\nexport default class {}");
    assert!(parser.parse_diagnostics.is_empty(), "{:?}", parser.parse_diagnostics);
    let stmts = statements(&parser.arena, root);
    assert_eq!(parser.arena.kind(stmts[0]), Some(NodeKind::ExportAssignment));
    let NodeData::ExportDeclaration(decl) = &parser.arena.get(stmts[1]).unwrap().data else {
        panic!("expected export declaration");
    };
    assert!(decl.is_default_export);
    assert_eq!(
        parser.arena.kind(decl.export_clause),
        Some(NodeKind::ClassDeclaration)
    );
}

#[test]
fn import_calls_stay_expressions() {
    let kinds = statement_kinds("import('./lazy.js');\nimport.meta.url;");
    assert_eq!(
        kinds,
        vec![NodeKind::ExpressionStatement, NodeKind::ExpressionStatement]
    );
}

#[test]
fn module_items_must_be_top_level() {
    for source in ["{ import a from 'a'; }", "function f() { export const x = 1; }"] {
        let (parser, _) = parse_source(source);
        assert!(
            parser
                .parse_diagnostics
                .iter()
                .any(|d| d.code == diagnostic_codes::MODULE_ITEM_NOT_AT_TOP_LEVEL),
            "{source:?}: {:?}",
            parser.parse_diagnostics
        );
    }
    let (parser, _) = parse_source("import { default } from 'a';");
    assert_eq!(parser.parse_diagnostics.len(), 1);
    assert_eq!(
        parser.parse_diagnostics[0].code,
        diagnostic_codes::IDENTIFIER_EXPECTED
    );
}

#[test]
fn labeled_statements() {
    let (parser, root) = parse_source("outer: for (;;) { inner: while (x) { continue outer; } }");
    assert!(parser.parse_diagnostics.is_empty(), "{:?}", parser.parse_diagnostics);
    let stmts = statements(&parser.arena, root);
    let NodeData::LabeledStatement(labeled) = &parser.arena.get(stmts[0]).unwrap().data else {
        panic!("expected labeled statement");
    };
    assert_eq!(parser.arena.get_identifier_text(labeled.label), Some("outer"));
    assert_eq!(
        parser.arena.kind(labeled.statement),
        Some(NodeKind::ForStatement)
    );
}

#[test]
fn unsupported_syntax_is_reported() {
    for source in ["with (o) {}", "x = /re/;", "for await (const x of y) {}", "`t`"] {
        let (parser, _) = parse_source(source);
        assert!(
            parser.parse_diagnostics.iter().any(|d| d.code == 1200),
            "expected unsupported-syntax diagnostic for {source:?}, got {:?}",
            parser.parse_diagnostics
        );
    }
}

#[test]
fn deep_nesting_reports_instead_of_overflowing() {
    let source = format!("{}x{}", "(".repeat(2000), ")".repeat(2000));
    let (parser, _) = parse_source(&source);
    assert!(parser.parse_diagnostics.iter().any(|d| d.code == 1201));
}

#[test]
fn long_operator_chains_report_nesting() {
    let source = format!("x{};", " + x".repeat(600));
    let (parser, _) = parse_source(&source);
    let nesting: Vec<_> = parser
        .parse_diagnostics
        .iter()
        .filter(|d| d.code == 1201)
        .collect();
    assert_eq!(nesting.len(), 1);

    let (parser, _) = parse_source(&format!("x{};", " + x".repeat(300)));
    assert!(parser.parse_diagnostics.is_empty());

    let (parser, _) = parse_source(&format!("a{}();", ".b".repeat(600)));
    assert!(parser.parse_diagnostics.iter().any(|d| d.code == 1201));
}

#[test]
fn node_ranges_cover_source_text() {
    let source = "foo(1);  bar;";
    let (parser, root) = parse_source(source);
    let stmts = statements(&parser.arena, root);
    let first = parser.arena.get(stmts[0]).unwrap();
    assert_eq!(&source[first.pos as usize..first.end as usize], "foo(1);");
    let second = parser.arena.get(stmts[1]).unwrap();
    assert_eq!(&source[second.pos as usize..second.end as usize], "bar;");
    let file = parser.arena.get(root).unwrap();
    assert_eq!(file.end as usize, source.len());
}
