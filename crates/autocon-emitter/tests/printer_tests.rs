//! Printer output for parsed (untransformed) programs.

use autocon_emitter::Printer;
use autocon_parser::ParserState;

fn print(source: &str) -> String {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.parse_diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        parser.parse_diagnostics
    );
    Printer::new(&parser.arena).print(root)
}

/// Printing the printer's own output must be a fixed point.
fn assert_stable(source: &str) {
    let first = print(source);
    assert_eq!(print(&first), first, "not stable: {source:?}");
}

#[test]
fn statements_get_semicolons_and_lines() {
    assert_eq!(print("a\nb()\nvar c = 1"), "a;\nb();\nvar c = 1;\n");
    assert_eq!(print("return_ = 1; ;"), "return_ = 1;\n;\n");
    assert_eq!(print("debugger"), "debugger;\n");
}

#[test]
fn blocks_are_indented() {
    assert_eq!(
        print("if (a) { b(); if (c) { d(); } }"),
        "if (a) {\n    b();\n    if (c) {\n        d();\n    }\n}\n"
    );
    assert_eq!(print("{}"), "{ }\n");
}

#[test]
fn else_if_chains_stay_flat() {
    assert_eq!(
        print("if (a) { x(); } else if (b) { y(); } else { z(); }"),
        "if (a) {\n    x();\n} else if (b) {\n    y();\n} else {\n    z();\n}\n"
    );
}

#[test]
fn non_block_bodies_go_on_their_own_line() {
    assert_eq!(print("while (a) b();"), "while (a)\n    b();\n");
    assert_eq!(print("do x(); while (y)"), "do\n    x();\nwhile (y);\n");
}

#[test]
fn loops() {
    assert_eq!(
        print("for (let i = 0; i < n; i++) { }"),
        "for (let i = 0; i < n; i++) { }\n"
    );
    assert_eq!(print("for (;;) { }"), "for (;;) { }\n");
    assert_eq!(
        print("for (const [k, v] of map) { }"),
        "for (const [k, v] of map) { }\n"
    );
    assert_eq!(print("for (key in obj) { }"), "for (key in obj) { }\n");
}

#[test]
fn try_and_switch() {
    assert_eq!(
        print("try { a(); } catch (e) { b(); } finally { c(); }"),
        "try {\n    a();\n} catch (e) {\n    b();\n} finally {\n    c();\n}\n"
    );
    assert_eq!(print("try { } catch { }"), "try { } catch { }\n");
    assert_eq!(
        print("switch (x) { case 1: a(); break; default: b(); }"),
        "switch (x) {\n    case 1:\n        a();\n        break;\n    default:\n        b();\n}\n"
    );
}

#[test]
fn expressions_keep_their_parentheses() {
    assert_eq!(print("(a + b) * c"), "(a + b) * c;\n");
    assert_eq!(print("a+b*c"), "a + b * c;\n");
    assert_eq!(print("x = y ? 1 : 2"), "x = y ? 1 : 2;\n");
    assert_eq!(print("(function () {})"), "(function() { });\n");
}

#[test]
fn unary_spacing() {
    assert_eq!(print("- -x"), "- -x;\n");
    assert_eq!(print("+ ++x"), "+ ++x;\n");
    assert_eq!(print("-x"), "-x;\n");
    assert_eq!(print("typeof x"), "typeof x;\n");
    assert_eq!(print("void 0"), "void 0;\n");
    assert_eq!(print("i++"), "i++;\n");
}

#[test]
fn calls_members_and_new() {
    assert_eq!(print("a.b[c](d, e)"), "a.b[c](d, e);\n");
    assert_eq!(print("new Foo"), "new Foo();\n");
    assert_eq!(print("new a.B(1)"), "new a.B(1);\n");
    assert_eq!(print("f(...args)"), "f(...args);\n");
}

#[test]
fn literals() {
    assert_eq!(print("x = [1, , 2]"), "x = [1,, 2];\n");
    assert_eq!(print("x = {}"), "x = {};\n");
    assert_eq!(
        print("x = { a, b: 1, [c]: 2, ...d }"),
        "x = { a, b: 1, [c]: 2, ...d };\n"
    );
    assert_eq!(print("x = 'single'"), "x = 'single';\n");
    assert_eq!(print("x = 0x1F"), "x = 0x1F;\n");
    assert_eq!(print("x = [true, false, null]"), "x = [true, false, null];\n");
}

#[test]
fn functions_and_arrows() {
    assert_eq!(
        print("function f(a, b = 1, ...c) { return a; }"),
        "function f(a, b = 1, ...c) {\n    return a;\n}\n"
    );
    assert_eq!(
        print("async function* g() { yield* h(); }"),
        "async function* g() {\n    yield* h();\n}\n"
    );
    assert_eq!(print("const f = x => x + 1"), "const f = (x) => x + 1;\n");
    assert_eq!(
        print("const g = async ({ a }) => { await a; }"),
        "const g = async ({ a }) => {\n    await a;\n};\n"
    );
}

#[test]
fn classes() {
    assert_eq!(
        print("class A extends B { static x = 1; constructor() { super(); } get y() { return 1; } }"),
        "class A extends B {\n    static x = 1;\n    constructor() {\n        super();\n    }\n    get y() {\n        return 1;\n    }\n}\n"
    );
    assert_eq!(print("class E {}"), "class E { }\n");
}

#[test]
fn optional_chains() {
    assert_eq!(print("a?.b?.[c]?.(d)"), "a?.b?.[c]?.(d);\n");
    assert_eq!(print("x = a?.b.c"), "x = a?.b.c;\n");
}

#[test]
fn module_items() {
    assert_eq!(
        print("import 'a'\nimport b, * as c from 'c'\nimport { d, e as f } from \"g\""),
        "import 'a';\nimport b, * as c from 'c';\nimport { d, e as f } from \"g\";\n"
    );
    assert_eq!(
        print("export const a = 1\nexport { a as b }\nexport * from 'm'"),
        "export const a = 1;\nexport { a as b };\nexport * from 'm';\n"
    );
    assert_eq!(print("export * as n from 'n'"), "export * as n from 'n';\n");
    assert_eq!(
        print("export default function () {}\nexport default a + b"),
        "export default function() { }\nexport default a + b;\n"
    );
    assert_eq!(
        print("export class C {}\nexport {} from 'x'"),
        "export class C { }\nexport {} from 'x';\n"
    );
    assert_eq!(
        print("import.meta.url; import('./x.js')"),
        "import.meta.url;\nimport('./x.js');\n"
    );
}

#[test]
fn labeled_statements() {
    assert_eq!(
        print("outer: for (;;) { break outer; }"),
        "outer: for (;;) {\n    break outer;\n}\n"
    );
}

#[test]
fn output_is_a_fixed_point() {
    for source in [
        "if (a) b(); else if (c) d(); else e();",
        "while (x) { x--; }",
        "const { a, b: [c], ...d } = o;",
        "class A { m() { } static async *n() { } }",
        "x = { m() { }, get p() { return 1; } };",
        "switch (a) { case 1: case 2: { b(); } }",
        "import a, { b as c } from 'm'; export { c as default };",
        "loop: while (a?.b) { continue loop; }",
    ] {
        assert_stable(source);
    }
}
