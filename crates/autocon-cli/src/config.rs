use anyhow::{Context, Result};
use autocon_emitter::{AutoConsoleOptions, FunctionBodyPolicy, OutputCallee, PrinterOptions};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "autocon.json";

/// Custom deserializer for boolean options that can be bools or strings.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                s
            ))),
        },
    }
}

/// Contents of `autocon.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoconConfig {
    #[serde(default)]
    pub callee: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub preserve_namespace_calls: Option<bool>,
    #[serde(default)]
    pub function_bodies: Option<FunctionBodyPolicy>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub indent_width: Option<usize>,
}

/// Everything a run needs, after merging the config file with CLI flags.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub transform: AutoConsoleOptions,
    pub printer: PrinterOptions,
    pub exclude: GlobSet,
}

pub fn parse_config(source: &str) -> Result<AutoconConfig> {
    serde_json::from_str(source).context("failed to parse autocon config")
}

pub fn load_config(path: &Path) -> Result<AutoconConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// The explicit `--config` path, or `autocon.json` in `cwd` if it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(cwd.join(path));
    }
    let default = cwd.join(CONFIG_FILE_NAME);
    default.is_file().then_some(default)
}

pub fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build exclude patterns")
}

/// Merge `config` with `args`. Flags win over the file.
pub fn resolve_options(config: &AutoconConfig, args: &CliArgs) -> Result<ResolvedOptions> {
    let callee = match (&args.callee, &config.callee) {
        (Some(callee), _) => callee.clone(),
        (None, Some(text)) => text
            .parse::<OutputCallee>()
            .context("invalid `callee` in config")?,
        (None, None) => OutputCallee::default(),
    };

    let mut function_bodies = config.function_bodies.unwrap_or_default();
    if args.rewrite_function_declarations {
        function_bodies.function_declarations = false;
    }
    if args.rewrite_function_expressions {
        function_bodies.function_expressions = false;
    }
    if args.rewrite_arrow_functions {
        function_bodies.arrow_functions = false;
    }
    if args.rewrite_async_functions {
        function_bodies.async_functions = false;
    }
    if args.rewrite_generators {
        function_bodies.generators = false;
    }

    let transform = AutoConsoleOptions {
        callee,
        preserve_namespace_calls: args.preserve_namespace_calls
            || config.preserve_namespace_calls.unwrap_or(false),
        function_bodies,
    };

    let mut printer = PrinterOptions::default();
    if let Some(width) = args.indent_width.or(config.indent_width) {
        printer.indent_width = width;
    }

    let patterns: Vec<String> = config
        .exclude
        .iter()
        .chain(args.exclude.iter())
        .cloned()
        .collect();

    Ok(ResolvedOptions {
        transform,
        printer,
        exclude: build_exclude_set(&patterns)?,
    })
}
