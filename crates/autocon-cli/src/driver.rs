use anyhow::{Context, Result, bail};
use autocon_common::Diagnostic;
use autocon_emitter::{RewriteStats, transform_source_with};
use autocon_parser::{NodeArena, NodeIndex};
use globset::GlobSet;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span};
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::ResolvedOptions;

pub const EXIT_SUCCESS: i32 = 0;
/// `--check` found files that would change.
pub const EXIT_CHANGES_FOUND: i32 = 1;
pub const EXIT_DIAGNOSTICS: i32 = 2;

const JS_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

pub fn is_js_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| JS_EXTENSIONS.contains(&ext))
}

/// An input file and where it lands under `--out-dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

#[derive(Debug)]
pub struct FileResult {
    /// Name used in diagnostics and stats.
    pub file: String,
    /// `None` for stdin.
    pub input: Option<InputFile>,
    pub source: String,
    /// Printed code (or the AST dump); `None` when diagnostics were reported.
    pub output: Option<String>,
    pub stats: RewriteStats,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileResult {
    pub fn changed(&self) -> bool {
        self.stats.wrapped > 0
    }
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub files: Vec<FileResult>,
    pub written: Vec<PathBuf>,
}

impl RunResult {
    pub fn totals(&self) -> RewriteStats {
        let mut totals = RewriteStats::default();
        for file in &self.files {
            totals.merge(&file.stats);
        }
        totals
    }

    pub fn has_diagnostics(&self) -> bool {
        self.files.iter().any(|f| !f.diagnostics.is_empty())
    }

    pub fn changed_files(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| f.changed())
    }

    pub fn exit_code(&self, check: bool) -> i32 {
        if self.has_diagnostics() {
            EXIT_DIAGNOSTICS
        } else if check && self.changed_files().next().is_some() {
            EXIT_CHANGES_FOUND
        } else {
            EXIT_SUCCESS
        }
    }
}

#[derive(Serialize)]
struct AstDump<'a> {
    root: NodeIndex,
    arena: &'a NodeArena,
}

/// Expand `inputs` into the list of files to process. Directories are walked
/// for JavaScript files, skipping paths (relative to the directory) that
/// match `exclude`. Files named explicitly are always included. A file
/// reached twice is kept once.
pub fn discover_inputs(
    inputs: &[PathBuf],
    cwd: &Path,
    exclude: &GlobSet,
) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();
    let mut seen = FxHashSet::default();
    for input in inputs {
        let path = cwd.join(input);
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(&path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if !entry.file_type().is_file() || !is_js_file(entry_path) {
                    continue;
                }
                let Ok(relative) = entry_path.strip_prefix(&path) else {
                    continue;
                };
                if exclude.is_match(relative) {
                    debug!(path = %entry_path.display(), "excluded");
                    continue;
                }
                found.push(InputFile {
                    path: entry_path.to_path_buf(),
                    relative: relative.to_path_buf(),
                });
            }
            found.sort_by(|a, b| a.path.cmp(&b.path));
            files.extend(found.into_iter().filter(|f| seen.insert(f.path.clone())));
        } else if path.is_file() {
            let relative = path
                .file_name()
                .map(PathBuf::from)
                .with_context(|| format!("input has no file name: {}", path.display()))?;
            if seen.insert(path.clone()) {
                files.push(InputFile { path, relative });
            }
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    Ok(files)
}

/// Rewrite one source text. Parse and transform failures become
/// diagnostics on the result rather than errors.
pub fn process_source(
    file: &str,
    source: String,
    options: &ResolvedOptions,
    print_ast: bool,
) -> Result<FileResult> {
    let _span = debug_span!("process_source", file).entered();
    let mut result = FileResult {
        file: file.to_string(),
        input: None,
        source: String::new(),
        output: None,
        stats: RewriteStats::default(),
        diagnostics: Vec::new(),
    };

    match transform_source_with(file, &source, &options.transform, options.printer.clone()) {
        Ok(output) => {
            result.stats = output.stats;
            result.output = Some(if print_ast {
                let dump = AstDump {
                    root: output.root,
                    arena: &output.arena,
                };
                serde_json::to_string_pretty(&dump).context("failed to serialize syntax tree")?
            } else {
                output.code
            });
        }
        Err(err) => {
            debug!(error = %err, "transform failed");
            result.diagnostics = err.to_diagnostics(file);
        }
    }
    result.source = source;
    Ok(result)
}

/// Process every input in parallel, one pass instance per file, and write
/// outputs under `--out-dir` unless `--check` is set.
pub fn run(args: &CliArgs, cwd: &Path, options: &ResolvedOptions) -> Result<RunResult> {
    let inputs = discover_inputs(&args.inputs, cwd, &options.exclude)?;
    debug!(files = inputs.len(), "discovered inputs");

    let files = inputs
        .par_iter()
        .map(|input| -> Result<FileResult> {
            let source = std::fs::read_to_string(&input.path)
                .with_context(|| format!("failed to read {}", input.path.display()))?;
            let mut result =
                process_source(&input.path.display().to_string(), source, options, args.print_ast)?;
            result.input = Some(input.clone());
            Ok(result)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = RunResult {
        files,
        written: Vec::new(),
    };
    if !args.check
        && let Some(out_dir) = &args.out_dir
    {
        result.written = write_outputs(&result.files, &cwd.join(out_dir))?;
    }
    Ok(result)
}

/// Write each successful result to `out_dir`, mirroring input layout.
///
/// Paths are relative to their input root, so two roots can map different
/// files onto one destination. That is an error and nothing is written.
pub fn write_outputs(files: &[FileResult], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut destinations: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    let mut planned = Vec::new();
    for file in files {
        let (Some(input), Some(output)) = (&file.input, &file.output) else {
            continue;
        };
        let dest = out_dir.join(&input.relative);
        if let Some(previous) = destinations.insert(dest.clone(), &input.path) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.path.display(),
                dest.display()
            );
        }
        planned.push((dest, output));
    }

    let mut written = Vec::new();
    for (dest, output) in planned {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&dest, output)
            .with_context(|| format!("failed to write {}", dest.display()))?;
        written.push(dest);
    }
    Ok(written)
}
