//! Eligibility of an expression statement for wrapping.

use super::options::AutoConsoleOptions;
use super::scope::ScopeTracker;
use autocon_parser::parser::node::NodeData;
use autocon_parser::{NodeArena, NodeIndex, NodeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapReason {
    /// A call whose result would be discarded.
    Call,
    /// A bare reference to a declared name.
    BoundIdentifier,
    /// A binary, logical or conditional computation.
    Computation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Already a call to the output function.
    OutputCall,
    /// A call on the output object, with namespace preservation on.
    NamespaceCall,
    /// A bare identifier no enclosing scope declares.
    UnboundIdentifier,
    /// An expression kind that is never wrapped.
    IneligibleKind(NodeKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Wrap(WrapReason),
    Skip(SkipReason),
}

impl Eligibility {
    pub fn is_wrap(self) -> bool {
        matches!(self, Eligibility::Wrap(_))
    }
}

/// Decide whether the expression of a statement should be wrapped.
/// Parentheses around the expression are looked through.
pub fn classify(
    arena: &NodeArena,
    expression: NodeIndex,
    scopes: &ScopeTracker,
    options: &AutoConsoleOptions,
) -> Eligibility {
    let inner = arena.skip_parentheses(expression);
    let Some(node) = arena.get(inner) else {
        return Eligibility::Skip(SkipReason::IneligibleKind(NodeKind::ParenthesizedExpression));
    };

    match &node.data {
        NodeData::CallExpression(call) => {
            if options.callee.matches(arena, call.callee) {
                Eligibility::Skip(SkipReason::OutputCall)
            } else if options.preserve_namespace_calls
                && options.callee.matches_namespace(arena, call.callee)
            {
                Eligibility::Skip(SkipReason::NamespaceCall)
            } else {
                Eligibility::Wrap(WrapReason::Call)
            }
        }
        NodeData::Identifier(ident) => {
            if scopes.is_bound(&ident.name) {
                Eligibility::Wrap(WrapReason::BoundIdentifier)
            } else {
                Eligibility::Skip(SkipReason::UnboundIdentifier)
            }
        }
        NodeData::BinaryExpression(_)
        | NodeData::LogicalExpression(_)
        | NodeData::ConditionalExpression(_) => Eligibility::Wrap(WrapReason::Computation),
        other => Eligibility::Skip(SkipReason::IneligibleKind(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::auto_console::options::OutputCallee;
    use autocon_parser::ParserState;

    /// Classify the first statement of `source`.
    fn classify_first(
        source: &str,
        declared: &[&str],
        options: &AutoConsoleOptions,
    ) -> Eligibility {
        let mut parser = ParserState::new("test.js".to_string(), source.to_string());
        let root = parser.parse_source_file();
        assert!(parser.parse_diagnostics.is_empty());
        let NodeData::SourceFile(sf) = &parser.arena.get(root).unwrap().data else {
            panic!("expected SourceFile");
        };
        let first = parser.arena.get(sf.statements.nodes[0]).unwrap();
        let NodeData::ExpressionStatement(stmt) = &first.data else {
            panic!("expected ExpressionStatement");
        };
        let mut scopes = ScopeTracker::new();
        scopes.push_frame();
        for name in declared {
            scopes.declare(name);
        }
        classify(&parser.arena, stmt.expression, &scopes, options)
    }

    fn check(source: &str, declared: &[&str]) -> Eligibility {
        classify_first(source, declared, &AutoConsoleOptions::default())
    }

    #[test]
    fn output_calls_are_skipped() {
        assert_eq!(
            check("console.log('x')", &[]),
            Eligibility::Skip(SkipReason::OutputCall)
        );
        assert_eq!(
            check("console['log']('x')", &[]),
            Eligibility::Skip(SkipReason::OutputCall)
        );
        assert_eq!(
            check("(console.log('x'))", &[]),
            Eligibility::Skip(SkipReason::OutputCall)
        );
        assert_eq!(
            check("console.log?.('x')", &[]),
            Eligibility::Skip(SkipReason::OutputCall)
        );
    }

    #[test]
    fn other_calls_are_wrapped() {
        for source in [
            "alert('x')",
            "console.error(e)",
            "a.b.c()",
            "f()()",
            "console.log.bind(x)()",
            "a?.b()",
            "f?.()",
            "import('./m.js')",
        ] {
            assert_eq!(
                check(source, &[]),
                Eligibility::Wrap(WrapReason::Call),
                "{source}"
            );
        }
    }

    #[test]
    fn namespace_calls_are_preserved_on_request() {
        let options = AutoConsoleOptions {
            preserve_namespace_calls: true,
            ..AutoConsoleOptions::default()
        };
        assert_eq!(
            classify_first("console.error(e)", &[], &options),
            Eligibility::Skip(SkipReason::NamespaceCall)
        );
        assert_eq!(
            classify_first("alert(e)", &[], &options),
            Eligibility::Wrap(WrapReason::Call)
        );
    }

    #[test]
    fn custom_callee_is_recognized() {
        let options = AutoConsoleOptions {
            callee: OutputCallee::new("logger", "info"),
            ..AutoConsoleOptions::default()
        };
        assert_eq!(
            classify_first("logger.info(1)", &[], &options),
            Eligibility::Skip(SkipReason::OutputCall)
        );
        assert_eq!(
            classify_first("console.log(1)", &[], &options),
            Eligibility::Wrap(WrapReason::Call)
        );
    }

    #[test]
    fn identifiers_depend_on_scope() {
        assert_eq!(
            check("a", &["a"]),
            Eligibility::Wrap(WrapReason::BoundIdentifier)
        );
        assert_eq!(
            check("variable", &["a"]),
            Eligibility::Skip(SkipReason::UnboundIdentifier)
        );
        assert_eq!(
            check("((a))", &["a"]),
            Eligibility::Wrap(WrapReason::BoundIdentifier)
        );
    }

    #[test]
    fn computations_are_wrapped() {
        for source in ["1 + 1", "2+2/2*4-5", "1 === 2", "a || 2", "a ? b : c", "x in y"] {
            assert_eq!(
                check(source, &[]),
                Eligibility::Wrap(WrapReason::Computation),
                "{source}"
            );
        }
    }

    #[test]
    fn everything_else_is_skipped() {
        for (source, kind) in [
            ("a = 1", NodeKind::AssignmentExpression),
            ("a.b", NodeKind::MemberExpression),
            ("a?.b", NodeKind::MemberExpression),
            ("import.meta", NodeKind::MemberExpression),
            ("!a", NodeKind::UnaryExpression),
            ("i++", NodeKind::UpdateExpression),
            ("1", NodeKind::NumericLiteral),
            ("'s'", NodeKind::StringLiteral),
            ("a, b", NodeKind::SequenceExpression),
            ("new Foo()", NodeKind::NewExpression),
            ("(() => 1)", NodeKind::ArrowFunction),
            ("this", NodeKind::ThisExpression),
        ] {
            assert_eq!(
                check(source, &["a"]),
                Eligibility::Skip(SkipReason::IneligibleKind(kind)),
                "{source}"
            );
        }
    }
}
