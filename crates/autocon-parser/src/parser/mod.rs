//! Recursive-descent parser for the JavaScript subset understood by autocon.
//!
//! The parser never panics on bad input. Problems are collected as
//! [`ParseDiagnostic`]s and the offending construct is skipped or replaced by
//! `NodeIndex::NONE`, so callers must check `parse_diagnostics` before
//! handing the tree to a transform.

pub mod base;
pub mod node;

mod state;
mod state_expressions;
mod state_statements;

pub use state::ParserState;

use autocon_common::Diagnostic;
use serde::Serialize;

/// A syntax error found while scanning or parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

impl ParseDiagnostic {
    pub fn into_diagnostic(self, file: impl Into<String>) -> Diagnostic {
        Diagnostic::error(file, self.start, self.length, self.message, self.code)
    }
}

impl std::fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (AC{}) at {}", self.message, self.code, self.start)
    }
}
