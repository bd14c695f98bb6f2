//! Which function bodies the auto-console pass descends into.

use autocon_emitter::{AutoConsoleOptions, FunctionBodyPolicy, transform_source};

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn rewrite_with_policy(source: &str, policy: FunctionBodyPolicy) -> (String, usize) {
    let options = AutoConsoleOptions {
        function_bodies: policy,
        ..AutoConsoleOptions::default()
    };
    let output = transform_source("test.js", source, &options).unwrap();
    (
        strip_whitespace(&output.code),
        output.stats.excluded_function_bodies,
    )
}

const PROGRAM: &str = "
function decl(p) { p; }
const expr = function named() { named; };
const arrow = (q) => { q; };
class C { method(r) { r; } }
";

#[test]
fn default_policy_skips_plain_functions_only() {
    let (code, excluded) = rewrite_with_policy(PROGRAM, FunctionBodyPolicy::default());
    assert_eq!(
        code,
        strip_whitespace(
            "function decl(p) { p; }
             const expr = function named() { named; };
             const arrow = (q) => { q; };
             class C { method(r) { console.log(r); } }"
        )
    );
    assert_eq!(excluded, 3);
}

#[test]
fn rewrite_all_enters_every_body() {
    let (code, excluded) = rewrite_with_policy(PROGRAM, FunctionBodyPolicy::rewrite_all());
    assert_eq!(
        code,
        strip_whitespace(
            "function decl(p) { console.log(p); }
             const expr = function named() { console.log(named); };
             const arrow = (q) => { console.log(q); };
             class C { method(r) { console.log(r); } }"
        )
    );
    assert_eq!(excluded, 0);
}

#[test]
fn switches_are_independent() {
    let policy = FunctionBodyPolicy {
        arrow_functions: false,
        ..FunctionBodyPolicy::default()
    };
    let (code, excluded) = rewrite_with_policy(PROGRAM, policy);
    assert!(code.contains("(q)=>{console.log(q);}"), "{code}");
    assert!(code.contains("functiondecl(p){p;}"), "{code}");
    assert_eq!(excluded, 2);
}

#[test]
fn async_and_generator_bodies_can_be_excluded_separately() {
    let source = "
        const a = async () => { f(); };
        const b = () => { g(); };
        const c = function* () { h(); };
    ";
    let policy = FunctionBodyPolicy {
        async_functions: true,
        generators: true,
        ..FunctionBodyPolicy::rewrite_all()
    };
    let (code, excluded) = rewrite_with_policy(source, policy);
    assert_eq!(
        code,
        strip_whitespace(
            "const a = async () => { f(); };
             const b = () => { console.log(g()); };
             const c = function*() { h(); };"
        )
    );
    assert_eq!(excluded, 2);
}

#[test]
fn methods_are_never_excluded() {
    let policy = FunctionBodyPolicy {
        async_functions: true,
        generators: true,
        ..FunctionBodyPolicy::default()
    };
    let (code, excluded) = rewrite_with_policy(
        "class K { async m() { f(); } *g() { h(); } } const o = { async n() { i(); } };",
        policy,
    );
    assert_eq!(
        code,
        strip_whitespace(
            "class K { async m() { console.log(f()); } *g() { console.log(h()); } }
             const o = { async n() { console.log(i()); } };"
        )
    );
    assert_eq!(excluded, 0);
}

#[test]
fn nested_bodies_inside_excluded_functions_stay_untouched() {
    let source = "function outer() { class Inner { m() { deep(); } } }";
    let (code, excluded) = rewrite_with_policy(source, FunctionBodyPolicy::default());
    assert_eq!(code, strip_whitespace(source));
    assert_eq!(excluded, 1);
}

#[test]
fn concise_arrow_bodies_are_never_statements() {
    let (code, _) = rewrite_with_policy("const f = () => g();", FunctionBodyPolicy::rewrite_all());
    assert_eq!(code, strip_whitespace("const f = () => g();"));
}

#[test]
fn parameters_are_visible_in_rewritten_bodies() {
    let (code, _) = rewrite_with_policy(
        "function f({ a }, [b] = [], ...rest) { a; b; rest; other; }",
        FunctionBodyPolicy::rewrite_all(),
    );
    assert_eq!(
        code,
        strip_whitespace(
            "function f({ a }, [b] = [], ...rest) { console.log(a); console.log(b); console.log(rest); other; }"
        )
    );
}
