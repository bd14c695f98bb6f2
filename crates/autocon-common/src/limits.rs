//! Centralized limits for recursive algorithms over the syntax tree.
//!
//! The scanner, parser, traversal and printer all recurse over the tree. These
//! constants bound that recursion so that adversarial input (thousands of
//! nested parentheses, deeply nested blocks) produces a diagnostic instead of
//! a stack overflow.

/// Maximum nesting depth accepted by the parser, both while recursing and
/// for the finished tree (long `a + b + ...` chains nest without recursion).
///
/// ```javascript
/// // Each `(` or `{` adds a level:
/// ((((((((((((((((((((((((((1))))))))))))))))))))))))));
/// ```
pub const MAX_PARSE_DEPTH: u32 = 400;

/// Maximum depth for host traversal of the syntax tree.
///
/// Larger than [`MAX_PARSE_DEPTH`] because the rewrite wraps statements in a
/// call, which adds two levels under every rewritten statement.
pub const MAX_AST_DEPTH: u32 = 500;

/// Maximum depth for the printer. Leaves headroom above [`MAX_AST_DEPTH`]
/// for the nodes a transform adds.
pub const MAX_EMIT_DEPTH: u32 = 600;

/// Initial node capacity reserved per byte of source text.
///
/// Typical JavaScript produces roughly one node per 4-6 bytes.
pub const NODES_PER_SOURCE_BYTE_DIVISOR: usize = 5;
