//! Printer, host traversal and transforms for autocon.
//!
//! - `emitter` - `Printer`, which serializes a `NodeArena` back to JavaScript
//! - `transforms::traverse` - the plugin-driven pre-order tree walk
//! - `transforms::auto_console` - wraps discarded expression statements in an
//!   output call such as `console.log(...)`

pub mod emitter;
pub mod transforms;

pub use emitter::{NewLineKind, Printer, PrinterOptions};
pub use transforms::auto_console::{
    AutoConsoleOptions, AutoConsolePass, FunctionBodyPolicy, OutputCallee, OutputCalleeError,
    RewriteStats, TransformOutput, transform_source, transform_source_with,
};
pub use transforms::traverse::{TraversalPlugin, VisitFlow, VisitorHooks, VisitorMap, traverse};
pub use transforms::TransformError;
