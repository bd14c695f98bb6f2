//! JavaScript scanner/tokenizer for autocon.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with save/restore for lookahead
//! - `char_codes` - Character classification utilities

pub mod char_codes;
mod scanner;
mod syntax_kind;

pub use scanner::{ScannerSnapshot, ScannerState, TokenFlags};
pub use syntax_kind::SyntaxKind;
