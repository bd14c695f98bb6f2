//! Host traversal - a pre-order walk that calls a plugin's per-kind hooks.
//!
//! A plugin describes itself with a [`VisitorMap`]: for each [`NodeKind`] it
//! cares about, an optional `enter` hook (before the children) and an
//! optional `exit` hook (after them). [`traverse`] guarantees:
//!
//! - every reachable node is entered at most once, parents before children,
//!   siblings in source order;
//! - a node's children are read *after* its `enter` hook returns, so a hook
//!   that re-points a child field is followed into the new subtree;
//! - `exit` runs for every node whose `enter` ran, including nodes whose
//!   `enter` returned [`VisitFlow::SkipChildren`], as long as no hook failed;
//! - the walk stops with [`TransformError::DepthLimitExceeded`] rather than
//!   recursing past `MAX_AST_DEPTH`.

use super::TransformError;
use autocon_common::limits::MAX_AST_DEPTH;
use autocon_parser::{NodeArena, NodeIndex, NodeKind};
use rustc_hash::FxHashMap;

/// What the traversal should do after an `enter` hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitFlow {
    Continue,
    /// Do not visit this node's children. `exit` still runs.
    SkipChildren,
}

pub type VisitFn<P> = fn(&mut P, &mut NodeArena, NodeIndex) -> Result<VisitFlow, TransformError>;

pub struct VisitorHooks<P> {
    pub enter: Option<VisitFn<P>>,
    pub exit: Option<VisitFn<P>>,
}

impl<P> Default for VisitorHooks<P> {
    fn default() -> Self {
        VisitorHooks {
            enter: None,
            exit: None,
        }
    }
}

/// Node kind -> hooks, as registered by a [`TraversalPlugin`].
pub struct VisitorMap<P> {
    hooks: FxHashMap<NodeKind, VisitorHooks<P>>,
}

impl<P> Default for VisitorMap<P> {
    fn default() -> Self {
        VisitorMap {
            hooks: FxHashMap::default(),
        }
    }
}

impl<P> VisitorMap<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` to run before the children of every `kind` node.
    pub fn on_enter(mut self, kind: NodeKind, hook: VisitFn<P>) -> Self {
        self.hooks.entry(kind).or_default().enter = Some(hook);
        self
    }

    /// Register `hook` to run after the children of every `kind` node.
    pub fn on_exit(mut self, kind: NodeKind, hook: VisitFn<P>) -> Self {
        self.hooks.entry(kind).or_default().exit = Some(hook);
        self
    }

    pub fn get(&self, kind: NodeKind) -> Option<&VisitorHooks<P>> {
        self.hooks.get(&kind)
    }

    pub fn contains(&self, kind: NodeKind) -> bool {
        self.hooks.contains_key(&kind)
    }

    /// Registered kinds in a stable order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<NodeKind> = self.hooks.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

/// A transform that can be driven by [`traverse`].
pub trait TraversalPlugin: Sized {
    fn visitors() -> VisitorMap<Self>;
}

/// Walk the tree under `root`, calling `plugin`'s hooks.
pub fn traverse<P: TraversalPlugin>(
    arena: &mut NodeArena,
    root: NodeIndex,
    plugin: &mut P,
) -> Result<(), TransformError> {
    let visitors = P::visitors();
    walk(&visitors, arena, root, plugin, 0)
}

fn walk<P>(
    visitors: &VisitorMap<P>,
    arena: &mut NodeArena,
    idx: NodeIndex,
    plugin: &mut P,
    depth: u32,
) -> Result<(), TransformError> {
    if depth >= MAX_AST_DEPTH {
        return Err(TransformError::DepthLimitExceeded {
            node: idx,
            limit: MAX_AST_DEPTH,
        });
    }
    let Some(kind) = arena.kind(idx) else {
        return Err(TransformError::MalformedNode {
            node: idx,
            kind: None,
            field: "child",
        });
    };

    let hooks = visitors.get(kind);
    let flow = match hooks.and_then(|h| h.enter) {
        Some(enter) => enter(plugin, arena, idx)?,
        None => VisitFlow::Continue,
    };

    if flow == VisitFlow::Continue {
        for child in arena.get_children(idx) {
            walk(visitors, arena, child, plugin, depth + 1)?;
        }
    }

    if let Some(exit) = hooks.and_then(|h| h.exit) {
        exit(plugin, arena, idx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocon_parser::ParserState;
    use autocon_parser::NodeList;
    use autocon_parser::parser::node::{
        BinaryExprData, ExpressionStatementData, IdentifierData, NodeData, SourceFileData,
    };
    use autocon_scanner::SyntaxKind;

    type HookResult = Result<VisitFlow, TransformError>;

    fn parse(source: &str) -> (NodeArena, NodeIndex) {
        let mut parser = ParserState::new("test.js".to_string(), source.to_string());
        let root = parser.parse_source_file();
        assert!(parser.parse_diagnostics.is_empty());
        (parser.arena, root)
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn name(arena: &NodeArena, idx: NodeIndex) -> String {
            arena
                .get_identifier_text(idx)
                .map_or_else(|| format!("{:?}", arena.kind(idx).unwrap()), str::to_string)
        }

        fn enter(p: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
            p.events.push(format!("enter {}", Self::name(arena, idx)));
            Ok(VisitFlow::Continue)
        }

        fn exit(p: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
            p.events.push(format!("exit {}", Self::name(arena, idx)));
            Ok(VisitFlow::Continue)
        }

        fn skip(p: &mut Self, _arena: &mut NodeArena, _idx: NodeIndex) -> HookResult {
            p.events.push("skip block".to_string());
            Ok(VisitFlow::SkipChildren)
        }
    }

    impl TraversalPlugin for Recorder {
        fn visitors() -> VisitorMap<Self> {
            VisitorMap::new()
                .on_enter(NodeKind::Identifier, Recorder::enter)
                .on_exit(NodeKind::ExpressionStatement, Recorder::exit)
                .on_enter(NodeKind::Block, Recorder::skip)
                .on_exit(NodeKind::Block, Recorder::exit)
        }
    }

    #[test]
    fn visits_in_source_order_and_honours_skip() {
        let (mut arena, root) = parse("a; { b; } c;");
        let mut recorder = Recorder::default();
        traverse(&mut arena, root, &mut recorder).unwrap();
        assert_eq!(
            recorder.events,
            vec![
                "enter a",
                "exit ExpressionStatement",
                "skip block",
                "exit Block",
                "enter c",
                "exit ExpressionStatement",
            ]
        );
    }

    struct Renamer;

    impl Renamer {
        /// Re-point the statement at a fresh identifier.
        fn replace(_: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
            let fresh = arena.add(
                0,
                0,
                NodeData::Identifier(IdentifierData {
                    name: "fresh".to_string(),
                }),
            );
            if let Some(NodeData::ExpressionStatement(stmt)) =
                arena.get_mut(idx).map(|n| &mut n.data)
            {
                stmt.expression = fresh;
            }
            Ok(VisitFlow::Continue)
        }

        fn check(_: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
            assert_eq!(arena.get_identifier_text(idx), Some("fresh"));
            Ok(VisitFlow::Continue)
        }
    }

    impl TraversalPlugin for Renamer {
        fn visitors() -> VisitorMap<Self> {
            VisitorMap::new()
                .on_enter(NodeKind::ExpressionStatement, Renamer::replace)
                .on_enter(NodeKind::Identifier, Renamer::check)
        }
    }

    #[test]
    fn children_are_read_after_enter() {
        let (mut arena, root) = parse("old;");
        traverse(&mut arena, root, &mut Renamer).unwrap();
    }

    /// `x + x + ... + x;` nested `levels` deep, built without the parser,
    /// which rejects trees this deep.
    fn deep_binary_tree(levels: usize) -> (NodeArena, NodeIndex) {
        let mut arena = NodeArena::new();
        let ident = |arena: &mut NodeArena| {
            arena.add(0, 1, NodeData::Identifier(IdentifierData { name: "x".to_string() }))
        };
        let mut expr = ident(&mut arena);
        for _ in 0..levels {
            let right = ident(&mut arena);
            expr = arena.add(
                0,
                1,
                NodeData::BinaryExpression(BinaryExprData {
                    operator: SyntaxKind::PlusToken,
                    left: expr,
                    right,
                }),
            );
        }
        let stmt = arena.add(
            0,
            1,
            NodeData::ExpressionStatement(ExpressionStatementData { expression: expr }),
        );
        let root = arena.add(
            0,
            1,
            NodeData::SourceFile(SourceFileData {
                file_name: "deep.js".to_string(),
                statements: NodeList::from_vec(vec![stmt]),
            }),
        );
        (arena, root)
    }

    struct Nothing;

    impl TraversalPlugin for Nothing {
        fn visitors() -> VisitorMap<Self> {
            VisitorMap::new()
        }
    }

    #[test]
    fn deep_trees_are_rejected() {
        let (mut arena, root) = deep_binary_tree(MAX_AST_DEPTH as usize + 10);
        let err = traverse(&mut arena, root, &mut Nothing).unwrap_err();
        assert!(matches!(
            err,
            TransformError::DepthLimitExceeded { limit: MAX_AST_DEPTH, .. }
        ));
    }

    #[test]
    fn dangling_index_is_malformed() {
        let mut arena = NodeArena::new();
        let err = traverse(&mut arena, NodeIndex(42), &mut Nothing).unwrap_err();
        assert!(matches!(err, TransformError::MalformedNode { kind: None, .. }));
    }

    #[test]
    fn visitor_map_lists_registered_kinds() {
        let map = Recorder::visitors();
        assert!(map.contains(NodeKind::Block));
        assert!(!map.contains(NodeKind::SourceFile));
        assert_eq!(
            map.kinds(),
            vec![
                NodeKind::ExpressionStatement,
                NodeKind::Block,
                NodeKind::Identifier
            ]
        );
    }
}
