//! JavaScript parser and AST types for autocon.
//!
//! - `parser::base` - `NodeIndex` and `NodeList` handles
//! - `parser::node` - the `Node` / `NodeData` tagged union and `NodeArena`
//! - `parser::ParserState` - recursive-descent parser producing a `NodeArena`

pub mod parser;

pub use parser::base::{NodeIndex, NodeList};
pub use parser::node::{Node, NodeArena, NodeData, NodeFlags, NodeKind};
pub use parser::{ParseDiagnostic, ParserState};
