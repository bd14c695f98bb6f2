//! Scope tracking: which identifiers are declared at the current point of
//! the walk.

use autocon_parser::parser::node::{NodeData, VariableKind};
use autocon_parser::{NodeArena, NodeIndex, NodeList};
use rustc_hash::FxHashSet;

#[derive(Debug)]
struct Frame {
    names: FxHashSet<String>,
    parent: Option<usize>,
}

/// Stack of lexical frames, innermost last. Each frame links to its
/// enclosing frame; lookups follow the links outwards.
///
/// `var` names are not routed here one by one: the pass collects them with
/// [`var_declaration_names`] when a function or the program is entered and
/// declares them while that frame is innermost.
#[derive(Debug, Default)]
pub struct ScopeTracker {
    frames: Vec<Frame>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        let parent = self.frames.len().checked_sub(1);
        self.frames.push(Frame {
            names: FxHashSet::default(),
            parent,
        });
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// Number of active frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drop frames until only `depth` remain.
    pub fn unwind_to(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    /// Register `name` in the innermost frame. A no-op with no frame active.
    pub fn declare(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.names.insert(name.to_string());
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        let mut current = self.frames.len().checked_sub(1);
        while let Some(i) = current {
            let frame = &self.frames[i];
            if frame.names.contains(name) {
                return true;
            }
            current = frame.parent;
        }
        false
    }
}

// =============================================================================
// Declaration collection
// =============================================================================

/// Every identifier bound by a binding target: a plain identifier, array and
/// object patterns (recursively), defaults and rest elements.
pub fn binding_names(arena: &NodeArena, target: NodeIndex, out: &mut Vec<String>) {
    let mut stack = vec![target];
    while let Some(idx) = stack.pop() {
        let Some(node) = arena.get(idx) else {
            continue;
        };
        match &node.data {
            NodeData::Identifier(ident) => out.push(ident.name.clone()),
            NodeData::ArrayPattern(list) => stack.extend(list.elements.iter().rev()),
            NodeData::ObjectPattern(obj) => stack.extend(obj.properties.iter().rev()),
            NodeData::PropertyAssignment(prop) => stack.push(prop.value),
            NodeData::AssignmentPattern(pattern) => stack.push(pattern.left),
            NodeData::RestElement(rest) => stack.push(rest.argument),
            _ => {}
        }
    }
}

/// Names bound by a parameter list.
pub fn parameter_names(arena: &NodeArena, parameters: &NodeList) -> Vec<String> {
    let mut names = Vec::new();
    for param in parameters.iter() {
        binding_names(arena, param, &mut names);
    }
    names
}

/// Names of function declarations that are direct members of `statements`,
/// including exported ones.
pub fn function_declaration_names(arena: &NodeArena, statements: &NodeList) -> Vec<String> {
    statements
        .iter()
        .filter_map(|stmt| {
            let stmt = match arena.get(stmt).map(|n| &n.data) {
                Some(NodeData::ExportDeclaration(export)) => export.export_clause,
                _ => stmt,
            };
            match arena.get(stmt).map(|n| &n.data) {
                Some(NodeData::FunctionDeclaration(func)) => {
                    arena.get_identifier_text(func.name).map(str::to_string)
                }
                _ => None,
            }
        })
        .collect()
}

/// Local names bound by the import declarations among `statements`.
pub fn import_binding_names(arena: &NodeArena, statements: &NodeList) -> Vec<String> {
    let mut names = Vec::new();
    for stmt in statements.iter() {
        let Some(NodeData::ImportDeclaration(decl)) = arena.get(stmt).map(|n| &n.data) else {
            continue;
        };
        let Some(NodeData::ImportClause(clause)) = arena.get(decl.import_clause).map(|n| &n.data)
        else {
            continue;
        };
        let mut bound = vec![clause.name];
        match arena.get(clause.named_bindings).map(|n| &n.data) {
            Some(NodeData::NamespaceImport(ns)) => bound.push(ns.name),
            Some(NodeData::NamedImports(list)) => {
                for spec in list.elements.iter() {
                    if let Some(NodeData::ImportSpecifier(spec)) = arena.get(spec).map(|n| &n.data)
                    {
                        bound.push(spec.name);
                    }
                }
            }
            _ => {}
        }
        names.extend(
            bound
                .into_iter()
                .filter_map(|idx| arena.get_identifier_text(idx).map(str::to_string)),
        );
    }
    names
}

/// Names of `var` declarations under `root`, without crossing into nested
/// functions or class bodies.
pub fn var_declaration_names(arena: &NodeArena, root: NodeIndex) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let Some(node) = arena.get(idx) else {
            continue;
        };
        if idx != root && (node.kind().is_function_like() || is_class(&node.data)) {
            continue;
        }
        if let NodeData::VariableDeclaration(decl) = &node.data
            && decl.kind == VariableKind::Var
        {
            for declarator in decl.declarations.iter() {
                if let Some(NodeData::VariableDeclarator(d)) =
                    arena.get(declarator).map(|n| &n.data)
                {
                    binding_names(arena, d.name, &mut names);
                }
            }
        }
        let mut children = arena.get_children(idx);
        children.reverse();
        stack.extend(children);
    }
    names
}

fn is_class(data: &NodeData) -> bool {
    matches!(
        data,
        NodeData::ClassDeclaration(_) | NodeData::ClassExpression(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use autocon_parser::ParserState;

    fn parse(source: &str) -> (NodeArena, NodeIndex) {
        let mut parser = ParserState::new("test.js".to_string(), source.to_string());
        let root = parser.parse_source_file();
        assert!(parser.parse_diagnostics.is_empty());
        (parser.arena, root)
    }

    #[test]
    fn lookup_walks_outwards() {
        let mut scopes = ScopeTracker::new();
        scopes.push_frame();
        scopes.declare("outer");
        scopes.push_frame();
        scopes.declare("inner");
        assert!(scopes.is_bound("outer"));
        assert!(scopes.is_bound("inner"));
        scopes.pop_frame();
        assert!(scopes.is_bound("outer"));
        assert!(!scopes.is_bound("inner"));
        assert!(!scopes.is_bound("missing"));
    }

    #[test]
    fn declare_without_frame_is_ignored() {
        let mut scopes = ScopeTracker::new();
        scopes.declare("x");
        assert!(!scopes.is_bound("x"));
    }

    #[test]
    fn unwind_restores_depth() {
        let mut scopes = ScopeTracker::new();
        scopes.push_frame();
        let depth = scopes.depth();
        scopes.push_frame();
        scopes.push_frame();
        scopes.unwind_to(depth);
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn collects_pattern_bindings() {
        let (arena, root) = parse("var [a, { b, c: [d], e = 1, ...f }, ...g] = x;");
        let names = var_declaration_names(&arena, root);
        assert_eq!(names, vec!["a", "b", "d", "e", "f", "g"]);
    }

    #[test]
    fn collects_import_bindings() {
        let (arena, root) = parse(
            "import 'side';\n\
             import a, * as ns from 'm';\n\
             import { b, c as d } from 'n';\n\
             export function e() {}\n\
             function f() {}",
        );
        let NodeData::SourceFile(sf) = &arena.get(root).unwrap().data else {
            panic!("expected SourceFile");
        };
        assert_eq!(
            import_binding_names(&arena, &sf.statements),
            vec!["a", "ns", "b", "d"]
        );
        assert_eq!(
            function_declaration_names(&arena, &sf.statements),
            vec!["e", "f"]
        );
    }

    #[test]
    fn var_collection_stops_at_functions() {
        let (arena, root) = parse(
            "if (x) { var a; for (var i of y) {} }\n\
             function f() { var hidden; }\n\
             const g = () => { var alsoHidden; };\n\
             let notVar;",
        );
        assert_eq!(var_declaration_names(&arena, root), vec!["a", "i"]);
    }
}
