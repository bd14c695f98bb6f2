use clap::Parser;
use std::path::Path;

use super::args::CliArgs;
use super::config::{AutoconConfig, parse_config, resolve_options};
use autocon_emitter::{FunctionBodyPolicy, OutputCallee};

fn args(argv: &[&str]) -> CliArgs {
    let mut full = vec!["autocon"];
    full.extend_from_slice(argv);
    CliArgs::try_parse_from(full).expect("test args should parse")
}

#[test]
fn parses_camel_case_config() {
    let config = parse_config(
        r#"{
            "callee": "logger.info",
            "preserveNamespaceCalls": true,
            "exclude": ["vendor/**"],
            "indentWidth": 2
        }"#,
    )
    .unwrap();

    assert_eq!(config.callee.as_deref(), Some("logger.info"));
    assert_eq!(config.preserve_namespace_calls, Some(true));
    assert_eq!(config.exclude, vec!["vendor/**"]);
    assert_eq!(config.indent_width, Some(2));
    assert!(config.function_bodies.is_none());
}

#[test]
fn accepts_string_booleans() {
    let config = parse_config(r#"{ "preserveNamespaceCalls": "yes" }"#).unwrap();
    assert_eq!(config.preserve_namespace_calls, Some(true));
    let config = parse_config(r#"{ "preserveNamespaceCalls": "off" }"#).unwrap();
    assert_eq!(config.preserve_namespace_calls, Some(false));
    assert!(parse_config(r#"{ "preserveNamespaceCalls": "maybe" }"#).is_err());
}

#[test]
fn partial_function_bodies_keep_defaults() {
    let config = parse_config(r#"{ "functionBodies": { "arrowFunctions": false } }"#).unwrap();
    let policy = config.function_bodies.unwrap();

    assert!(!policy.arrow_functions);
    assert!(policy.function_declarations);
    assert!(policy.function_expressions);
    assert!(!policy.async_functions);
}

#[test]
fn empty_config_resolves_to_defaults() {
    let resolved = resolve_options(&AutoconConfig::default(), &args(&[])).unwrap();

    assert_eq!(resolved.transform.callee, OutputCallee::default());
    assert!(!resolved.transform.preserve_namespace_calls);
    assert_eq!(resolved.transform.function_bodies, FunctionBodyPolicy::default());
    assert_eq!(resolved.printer.indent_width, 4);
    assert!(!resolved.exclude.is_match(Path::new("main.js")));
}

#[test]
fn invalid_config_callee_is_an_error() {
    let config = parse_config(r#"{ "callee": "console" }"#).unwrap();
    let err = resolve_options(&config, &args(&[])).unwrap_err();
    assert!(format!("{err:#}").contains("invalid `callee` in config"));
}

#[test]
fn flags_override_config() {
    let config = parse_config(
        r#"{ "callee": "logger.info", "indentWidth": 2, "functionBodies": { "generators": true } }"#,
    )
    .unwrap();
    let resolved = resolve_options(
        &config,
        &args(&[
            "--callee",
            "out.write",
            "--indent-width",
            "8",
            "--rewrite-function-declarations",
            "--rewrite-generators",
        ]),
    )
    .unwrap();

    assert_eq!(resolved.transform.callee, OutputCallee::new("out", "write"));
    assert_eq!(resolved.printer.indent_width, 8);
    assert!(!resolved.transform.function_bodies.function_declarations);
    assert!(!resolved.transform.function_bodies.generators);
    assert!(resolved.transform.function_bodies.arrow_functions);
}

#[test]
fn config_value_used_without_flag() {
    let config = parse_config(r#"{ "callee": "logger.info", "indentWidth": 2 }"#).unwrap();
    let resolved = resolve_options(&config, &args(&[])).unwrap();

    assert_eq!(resolved.transform.callee, OutputCallee::new("logger", "info"));
    assert_eq!(resolved.printer.indent_width, 2);
}

#[test]
fn exclude_patterns_from_both_sources_apply() {
    let config = parse_config(r#"{ "exclude": ["vendor/**"] }"#).unwrap();
    let resolved = resolve_options(&config, &args(&["--exclude", "*.min.js"])).unwrap();

    assert!(resolved.exclude.is_match(Path::new("vendor/lib.js")));
    assert!(resolved.exclude.is_match(Path::new("app.min.js")));
    assert!(!resolved.exclude.is_match(Path::new("src/app.js")));
}

#[test]
fn invalid_exclude_pattern_is_an_error() {
    let resolved = resolve_options(&AutoconConfig::default(), &args(&["--exclude", "a[b"]));
    assert!(resolved.is_err());
}
