//! Tree transforms and the host traversal that drives them.
//!
//! Transforms mutate a `NodeArena` in place. They register per-kind hooks
//! through [`traverse::TraversalPlugin`] and never walk the tree themselves,
//! so the traversal order and depth limit live in one place.

pub mod auto_console;
pub mod traverse;

use autocon_common::Diagnostic;
use autocon_common::diagnostics::diagnostic_codes;
use autocon_parser::{NodeArena, NodeIndex, NodeKind, ParseDiagnostic};
use std::fmt;

/// Failure of a transform run. The tree may be partially rewritten and
/// should not be printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransformError {
    /// A visited node lacks a child its kind requires, or an index points
    /// outside the arena (`kind` is `None` then).
    MalformedNode {
        node: NodeIndex,
        kind: Option<NodeKind>,
        field: &'static str,
    },
    /// The traversal refused to descend past `limit` levels.
    DepthLimitExceeded { node: NodeIndex, limit: u32 },
    /// The source had syntax errors; no transform was run.
    Parse(Vec<ParseDiagnostic>),
}

impl TransformError {
    pub(crate) fn malformed(arena: &NodeArena, node: NodeIndex, field: &'static str) -> Self {
        TransformError::MalformedNode {
            node,
            kind: arena.kind(node),
            field,
        }
    }

    /// Render as diagnostics for `file`. Parse errors keep their spans;
    /// structural errors are reported at the start of the file.
    pub fn to_diagnostics(&self, file: &str) -> Vec<Diagnostic> {
        match self {
            TransformError::Parse(diagnostics) => diagnostics
                .iter()
                .cloned()
                .map(|d| d.into_diagnostic(file))
                .collect(),
            TransformError::MalformedNode { .. } => vec![Diagnostic::error(
                file,
                0,
                0,
                self.to_string(),
                diagnostic_codes::MALFORMED_NODE,
            )],
            TransformError::DepthLimitExceeded { .. } => vec![Diagnostic::error(
                file,
                0,
                0,
                self.to_string(),
                diagnostic_codes::TRAVERSAL_TOO_DEEP,
            )],
        }
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::MalformedNode {
                node,
                kind: Some(kind),
                field,
            } => write!(
                f,
                "malformed syntax tree: {kind:?} node {} is missing `{field}`",
                node.0
            ),
            TransformError::MalformedNode {
                node,
                kind: None,
                field,
            } => write!(
                f,
                "malformed syntax tree: `{field}` refers to node {} which is not in the arena",
                node.0
            ),
            TransformError::DepthLimitExceeded { node, limit } => write!(
                f,
                "syntax tree is nested more than {limit} levels deep (at node {})",
                node.0
            ),
            TransformError::Parse(diagnostics) => {
                write!(f, "source has {} syntax error(s)", diagnostics.len())?;
                if let Some(first) = diagnostics.first() {
                    write!(f, "; first: {first}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for TransformError {}
