#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Read, Write};

use autocon_cli::args::CliArgs;
use autocon_cli::config::{AutoconConfig, find_config, load_config, resolve_options};
use autocon_cli::driver::{self, RunResult};
use autocon_cli::reporter::Reporter;

fn main() -> Result<()> {
    // Only initialised when AUTOCON_LOG or RUST_LOG is set.
    autocon_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let config = match find_config(&args, &cwd) {
        Some(path) => load_config(&path)?,
        None => AutoconConfig::default(),
    };
    let options = resolve_options(&config, &args)?;

    let result = if args.inputs.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        let file = driver::process_source("<stdin>", source, &options, args.print_ast)?;
        RunResult {
            files: vec![file],
            written: Vec::new(),
        }
    } else {
        driver::run(&args, &cwd, &options)?
    };

    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let mut reporter = Reporter::new(color);

    for file in &result.files {
        if !file.diagnostics.is_empty() {
            reporter.add_source(&file.file, &file.source);
            eprintln!("{}", reporter.render(&file.diagnostics));
        }
        if args.stats {
            eprintln!("{}", reporter.format_stats(&file.file, &file.stats));
        }
    }

    if args.check {
        for file in result.changed_files() {
            eprintln!("would rewrite {}", file.file);
        }
    } else if args.out_dir.is_none() || args.inputs.is_empty() {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for output in result.files.iter().filter_map(|f| f.output.as_deref()) {
            out.write_all(output.as_bytes())
                .context("failed to write to stdout")?;
        }
        out.flush().context("failed to flush stdout")?;
    }

    if args.stats && result.files.len() > 1 {
        eprintln!("{}", reporter.format_stats("total", &result.totals()));
    }

    std::process::exit(result.exit_code(args.check));
}
