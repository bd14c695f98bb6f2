//! Auto-console: wrap expression statements whose value would be discarded
//! in an output call.
//!
//! ```text
//! 1 + 1;          ->  console.log(1 + 1);
//! greet("bob");   ->  console.log(greet("bob"));
//! console.log(x); ->  console.log(x);
//! ```
//!
//! A statement is wrapped when its expression (looking through parentheses)
//! is a call to anything but the output function, a binary, logical or
//! conditional expression, or an identifier declared in an enclosing scope.
//! Assignments, updates, literals and everything else are left alone, as
//! are statements inside function bodies excluded by [`FunctionBodyPolicy`].
//! Running the pass twice changes nothing the second time.

mod classifier;
mod options;
mod pass;
mod rewriter;
mod scope;

pub use classifier::{Eligibility, SkipReason, WrapReason, classify};
pub use options::{AutoConsoleOptions, FunctionBodyPolicy, OutputCallee, OutputCalleeError};
pub use pass::{AutoConsolePass, RewriteStats};
pub use rewriter::wrap_statement;
pub use scope::ScopeTracker;

use crate::emitter::{Printer, PrinterOptions};
use crate::transforms::TransformError;
use autocon_parser::{NodeArena, NodeIndex, ParserState};
use tracing::{debug, debug_span};

/// Result of [`transform_source`].
#[derive(Debug)]
pub struct TransformOutput {
    /// The rewritten program, reformatted by the printer.
    pub code: String,
    pub stats: RewriteStats,
    /// The rewritten tree.
    pub arena: NodeArena,
    pub root: NodeIndex,
}

impl TransformOutput {
    /// Whether any statement was wrapped. Formatting differences from the
    /// input do not count.
    pub fn changed(&self) -> bool {
        self.stats.wrapped > 0
    }
}

/// Parse `source`, run the pass over it and print the result.
///
/// Syntax errors abort before any rewriting and are returned as
/// [`TransformError::Parse`].
pub fn transform_source(
    file_name: &str,
    source: &str,
    options: &AutoConsoleOptions,
) -> Result<TransformOutput, TransformError> {
    transform_source_with(file_name, source, options, PrinterOptions::default())
}

/// [`transform_source`] with explicit printer settings.
pub fn transform_source_with(
    file_name: &str,
    source: &str,
    options: &AutoConsoleOptions,
    printer_options: PrinterOptions,
) -> Result<TransformOutput, TransformError> {
    let _span = debug_span!("transform_source", file = file_name).entered();

    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    if !parser.parse_diagnostics.is_empty() {
        debug!(
            errors = parser.parse_diagnostics.len(),
            "parse failed, skipping rewrite"
        );
        return Err(TransformError::Parse(std::mem::take(
            &mut parser.parse_diagnostics,
        )));
    }
    let mut arena = std::mem::take(&mut parser.arena);
    debug!(nodes = arena.len(), "parsed");

    let mut pass = AutoConsolePass::new(options.clone());
    let stats = pass.run(&mut arena, root)?;

    let code = Printer::with_options(&arena, printer_options).print(root);
    Ok(TransformOutput {
        code,
        stats,
        arena,
        root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::NewLineKind;

    #[test]
    fn reports_parse_errors_without_rewriting() {
        let err = transform_source("bad.js", "1 +;", &AutoConsoleOptions::default()).unwrap_err();
        let TransformError::Parse(diagnostics) = err else {
            panic!("expected parse error");
        };
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn changed_reflects_wraps_only() {
        let out = transform_source("a.js", "x   =   1", &AutoConsoleOptions::default()).unwrap();
        assert!(!out.changed());
        assert_eq!(out.code, "x = 1;\n");

        let out = transform_source("a.js", "f()", &AutoConsoleOptions::default()).unwrap();
        assert!(out.changed());
        assert_eq!(out.code, "console.log(f());\n");
    }

    #[test]
    fn honours_printer_options() {
        let out = transform_source_with(
            "a.js",
            "if (a) { f(); }",
            &AutoConsoleOptions::default(),
            PrinterOptions {
                indent_width: 2,
                new_line: NewLineKind::CarriageReturnLineFeed,
            },
        )
        .unwrap();
        assert_eq!(out.code, "if (a) {\r\n  console.log(f());\r\n}\r\n");
    }
}
