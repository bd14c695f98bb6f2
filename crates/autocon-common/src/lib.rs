//! Common types and utilities for the autocon workspace.
//!
//! This crate provides foundational types used across all autocon crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`)
//! - Line/column positions (`LineMap`, `Position`)
//! - Traversal limits and thresholds

// Diagnostics reported by the scanner, parser and transform
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};
