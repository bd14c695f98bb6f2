use autocon_emitter::OutputCallee;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the autocon binary.
#[derive(Parser, Debug)]
#[command(
    name = "autocon",
    version,
    about = "Wrap discarded JavaScript expression statements in console.log(...)"
)]
pub struct CliArgs {
    /// Files or directories to rewrite. Reads stdin when none are given.
    pub inputs: Vec<PathBuf>,

    // ==================== Output ====================
    /// Write rewritten files under this directory instead of stdout.
    #[arg(short = 'o', long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Report files that would change and exit with status 1, writing nothing.
    #[arg(long)]
    pub check: bool,

    /// Print the rewritten syntax tree as JSON instead of code.
    #[arg(long = "print-ast")]
    pub print_ast: bool,

    /// Spaces per indentation level in printed output.
    #[arg(long = "indent-width")]
    pub indent_width: Option<usize>,

    /// Print per-file rewrite statistics to stderr.
    #[arg(long)]
    pub stats: bool,

    /// Colorize diagnostics. Defaults to on when stderr is a terminal.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub pretty: Option<bool>,

    // ==================== Configuration ====================
    /// Path to a JSON config file. `autocon.json` in the working directory
    /// is used when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output function as `object.property`.
    #[arg(long)]
    pub callee: Option<OutputCallee>,

    /// Leave every call on the output object alone, not only the callee.
    #[arg(long = "preserve-namespace-calls")]
    pub preserve_namespace_calls: bool,

    /// Glob patterns of files to skip when walking directories.
    #[arg(long)]
    pub exclude: Vec<String>,

    // ==================== Function bodies ====================
    /// Rewrite inside function declaration bodies.
    #[arg(long = "rewrite-function-declarations")]
    pub rewrite_function_declarations: bool,

    /// Rewrite inside function expression bodies.
    #[arg(long = "rewrite-function-expressions")]
    pub rewrite_function_expressions: bool,

    /// Rewrite inside arrow function bodies.
    #[arg(long = "rewrite-arrow-functions")]
    pub rewrite_arrow_functions: bool,

    /// Do not exclude async bodies on account of being async.
    #[arg(long = "rewrite-async-functions")]
    pub rewrite_async_functions: bool,

    /// Do not exclude generator bodies on account of being generators.
    #[arg(long = "rewrite-generators")]
    pub rewrite_generators: bool,
}
