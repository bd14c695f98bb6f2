//! The auto-console pass: scope bookkeeping plus the expression-statement
//! rewrite, driven by the host traversal.

use super::classifier::{Eligibility, SkipReason, classify};
use super::options::AutoConsoleOptions;
use super::rewriter::wrap_statement;
use super::scope::{
    ScopeTracker, binding_names, function_declaration_names, import_binding_names,
    parameter_names, var_declaration_names,
};
use crate::transforms::TransformError;
use crate::transforms::traverse::{TraversalPlugin, VisitFlow, VisitorMap, traverse};
use autocon_parser::parser::node::{NodeData, VariableKind};
use autocon_parser::{NodeArena, NodeIndex, NodeKind};
use serde::Serialize;
use tracing::{debug, trace};

type HookResult = Result<VisitFlow, TransformError>;

/// Counters collected over one or more runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteStats {
    /// Statements wrapped in the output call.
    pub wrapped: usize,
    /// Statements left alone because they already call the output object.
    pub output_calls: usize,
    pub unbound_identifiers: usize,
    /// Statements whose expression kind is never wrapped.
    pub ineligible: usize,
    /// Function bodies skipped under the function-body policy.
    pub excluded_function_bodies: usize,
}

impl RewriteStats {
    pub fn merge(&mut self, other: &RewriteStats) {
        self.wrapped += other.wrapped;
        self.output_calls += other.output_calls;
        self.unbound_identifiers += other.unbound_identifiers;
        self.ineligible += other.ineligible;
        self.excluded_function_bodies += other.excluded_function_bodies;
    }

    /// Expression statements that reached the classifier.
    pub fn statements_classified(&self) -> usize {
        self.wrapped + self.output_calls + self.unbound_identifiers + self.ineligible
    }

    fn record(&mut self, eligibility: Eligibility) {
        match eligibility {
            Eligibility::Wrap(_) => self.wrapped += 1,
            Eligibility::Skip(SkipReason::OutputCall | SkipReason::NamespaceCall) => {
                self.output_calls += 1
            }
            Eligibility::Skip(SkipReason::UnboundIdentifier) => self.unbound_identifiers += 1,
            Eligibility::Skip(SkipReason::IneligibleKind(_)) => self.ineligible += 1,
        }
    }
}

/// Wraps discarded expression statements in the configured output call.
///
/// One pass can be run over many trees; the scope stack is empty between
/// runs and the stats of the latest run are returned from [`run`](Self::run).
#[derive(Debug, Default)]
pub struct AutoConsolePass {
    options: AutoConsoleOptions,
    scopes: ScopeTracker,
    stats: RewriteStats,
}

impl AutoConsolePass {
    pub fn new(options: AutoConsoleOptions) -> Self {
        AutoConsolePass {
            options,
            scopes: ScopeTracker::new(),
            stats: RewriteStats::default(),
        }
    }

    pub fn options(&self) -> &AutoConsoleOptions {
        &self.options
    }

    /// Rewrite the tree under `root` in place.
    ///
    /// On error the tree may be partially rewritten; the scope stack is
    /// restored either way, so the pass stays usable.
    pub fn run(
        &mut self,
        arena: &mut NodeArena,
        root: NodeIndex,
    ) -> Result<RewriteStats, TransformError> {
        self.stats = RewriteStats::default();
        let depth = self.scopes.depth();
        if let Err(err) = traverse(arena, root, self) {
            self.scopes.unwind_to(depth);
            debug!(error = %err, "auto-console pass failed");
            return Err(err);
        }
        debug!(
            wrapped = self.stats.wrapped,
            output_calls = self.stats.output_calls,
            unbound = self.stats.unbound_identifiers,
            ineligible = self.stats.ineligible,
            excluded_bodies = self.stats.excluded_function_bodies,
            "auto-console pass finished"
        );
        Ok(self.stats)
    }

    // =========================================================================
    // Scope regions
    // =========================================================================

    fn enter_source_file(pass: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
        let Some(NodeData::SourceFile(sf)) = arena.get(idx).map(|n| &n.data) else {
            return Err(TransformError::malformed(arena, idx, "statements"));
        };
        pass.scopes.push_frame();
        for name in var_declaration_names(arena, idx) {
            pass.scopes.declare(&name);
        }
        for name in function_declaration_names(arena, &sf.statements) {
            pass.scopes.declare(&name);
        }
        for name in import_binding_names(arena, &sf.statements) {
            pass.scopes.declare(&name);
        }
        Ok(VisitFlow::Continue)
    }

    fn enter_block(pass: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
        let Some(NodeData::Block(block)) = arena.get(idx).map(|n| &n.data) else {
            return Err(TransformError::malformed(arena, idx, "statements"));
        };
        pass.scopes.push_frame();
        for name in function_declaration_names(arena, &block.statements) {
            pass.scopes.declare(&name);
        }
        Ok(VisitFlow::Continue)
    }

    fn enter_switch_case(pass: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
        let Some(NodeData::SwitchCase(case)) = arena.get(idx).map(|n| &n.data) else {
            return Err(TransformError::malformed(arena, idx, "consequent"));
        };
        pass.scopes.push_frame();
        for name in function_declaration_names(arena, &case.consequent) {
            pass.scopes.declare(&name);
        }
        Ok(VisitFlow::Continue)
    }

    fn enter_catch_clause(pass: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
        let Some(NodeData::CatchClause(clause)) = arena.get(idx).map(|n| &n.data) else {
            return Err(TransformError::malformed(arena, idx, "body"));
        };
        pass.scopes.push_frame();
        let mut names = Vec::new();
        binding_names(arena, clause.param, &mut names);
        for name in names {
            pass.scopes.declare(&name);
        }
        Ok(VisitFlow::Continue)
    }

    /// `for` heads get their own frame so `let` bindings in them stay local.
    fn enter_loop_head(pass: &mut Self, _arena: &mut NodeArena, _idx: NodeIndex) -> HookResult {
        pass.scopes.push_frame();
        Ok(VisitFlow::Continue)
    }

    fn exit_frame(pass: &mut Self, _arena: &mut NodeArena, _idx: NodeIndex) -> HookResult {
        pass.scopes.pop_frame();
        Ok(VisitFlow::Continue)
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    /// Push the function frame, then either populate it or skip the body
    /// under the function-body policy. The frame is pushed in both cases so
    /// `exit_frame` stays balanced.
    fn enter_function(pass: &mut Self, arena: &mut NodeArena, idx: NodeIndex) -> HookResult {
        let Some(node) = arena.get(idx) else {
            return Err(TransformError::malformed(arena, idx, "body"));
        };
        let (own_name, parameters, body, is_async, is_generator) = match &node.data {
            NodeData::FunctionDeclaration(func) => {
                (NodeIndex::NONE, &func.parameters, func.body, func.is_async, func.is_generator)
            }
            NodeData::FunctionExpression(func) => {
                (func.name, &func.parameters, func.body, func.is_async, func.is_generator)
            }
            NodeData::ArrowFunction(arrow) => {
                (NodeIndex::NONE, &arrow.parameters, arrow.body, arrow.is_async, false)
            }
            NodeData::ClassMethod(method) | NodeData::ObjectMethod(method) => (
                NodeIndex::NONE,
                &method.parameters,
                method.body,
                method.is_async,
                method.is_generator,
            ),
            _ => return Err(TransformError::malformed(arena, idx, "body")),
        };
        if body.is_none() {
            return Err(TransformError::malformed(arena, idx, "body"));
        }

        pass.scopes.push_frame();
        let kind = node.kind();
        if pass
            .options
            .function_bodies
            .excludes(kind, is_async, is_generator)
        {
            pass.stats.excluded_function_bodies += 1;
            trace!(node = idx.0, ?kind, "function body excluded");
            return Ok(VisitFlow::SkipChildren);
        }

        if let Some(name) = arena.get_identifier_text(own_name) {
            pass.scopes.declare(name);
        }
        for name in parameter_names(arena, parameters) {
            pass.scopes.declare(&name);
        }
        for name in var_declaration_names(arena, body) {
            pass.scopes.declare(&name);
        }
        Ok(VisitFlow::Continue)
    }

    fn enter_class_declaration(
        pass: &mut Self,
        arena: &mut NodeArena,
        idx: NodeIndex,
    ) -> HookResult {
        if let Some(NodeData::ClassDeclaration(class)) = arena.get(idx).map(|n| &n.data)
            && let Some(name) = arena.get_identifier_text(class.name)
        {
            pass.scopes.declare(name);
        }
        Ok(VisitFlow::Continue)
    }

    /// A named class expression binds its name only inside itself.
    fn enter_class_expression(
        pass: &mut Self,
        arena: &mut NodeArena,
        idx: NodeIndex,
    ) -> HookResult {
        pass.scopes.push_frame();
        if let Some(NodeData::ClassExpression(class)) = arena.get(idx).map(|n| &n.data)
            && let Some(name) = arena.get_identifier_text(class.name)
        {
            pass.scopes.declare(name);
        }
        Ok(VisitFlow::Continue)
    }

    // =========================================================================
    // Declarations and statements
    // =========================================================================

    /// `let` and `const` become visible when their declaration is reached;
    /// `var` was hoisted when the enclosing function was entered.
    fn enter_variable_declaration(
        pass: &mut Self,
        arena: &mut NodeArena,
        idx: NodeIndex,
    ) -> HookResult {
        let Some(NodeData::VariableDeclaration(decl)) = arena.get(idx).map(|n| &n.data) else {
            return Err(TransformError::malformed(arena, idx, "declarations"));
        };
        if decl.kind == VariableKind::Var {
            return Ok(VisitFlow::Continue);
        }
        let mut names = Vec::new();
        for declarator in decl.declarations.iter() {
            if let Some(NodeData::VariableDeclarator(d)) = arena.get(declarator).map(|n| &n.data) {
                binding_names(arena, d.name, &mut names);
            }
        }
        for name in names {
            pass.scopes.declare(&name);
        }
        Ok(VisitFlow::Continue)
    }

    fn enter_expression_statement(
        pass: &mut Self,
        arena: &mut NodeArena,
        idx: NodeIndex,
    ) -> HookResult {
        let expression = match arena.get(idx).map(|n| &n.data) {
            Some(NodeData::ExpressionStatement(stmt)) if stmt.expression.is_some() => {
                stmt.expression
            }
            _ => return Err(TransformError::malformed(arena, idx, "expression")),
        };

        let eligibility = classify(arena, expression, &pass.scopes, &pass.options);
        trace!(node = idx.0, ?eligibility, "classified expression statement");
        pass.stats.record(eligibility);
        if eligibility.is_wrap() {
            wrap_statement(arena, idx, &pass.options.callee)?;
        }
        Ok(VisitFlow::Continue)
    }
}

impl TraversalPlugin for AutoConsolePass {
    fn visitors() -> VisitorMap<Self> {
        let mut map = VisitorMap::new()
            .on_enter(NodeKind::SourceFile, Self::enter_source_file)
            .on_exit(NodeKind::SourceFile, Self::exit_frame)
            .on_enter(NodeKind::Block, Self::enter_block)
            .on_exit(NodeKind::Block, Self::exit_frame)
            .on_enter(NodeKind::SwitchCase, Self::enter_switch_case)
            .on_exit(NodeKind::SwitchCase, Self::exit_frame)
            .on_enter(NodeKind::CatchClause, Self::enter_catch_clause)
            .on_exit(NodeKind::CatchClause, Self::exit_frame)
            .on_enter(NodeKind::ClassExpression, Self::enter_class_expression)
            .on_exit(NodeKind::ClassExpression, Self::exit_frame)
            .on_enter(NodeKind::ClassDeclaration, Self::enter_class_declaration)
            .on_enter(NodeKind::VariableDeclaration, Self::enter_variable_declaration)
            .on_enter(NodeKind::ExpressionStatement, Self::enter_expression_statement);

        for kind in [
            NodeKind::ForStatement,
            NodeKind::ForInStatement,
            NodeKind::ForOfStatement,
        ] {
            map = map
                .on_enter(kind, Self::enter_loop_head)
                .on_exit(kind, Self::exit_frame);
        }
        for kind in [
            NodeKind::FunctionDeclaration,
            NodeKind::FunctionExpression,
            NodeKind::ArrowFunction,
            NodeKind::ClassMethod,
            NodeKind::ObjectMethod,
        ] {
            map = map
                .on_enter(kind, Self::enter_function)
                .on_exit(kind, Self::exit_frame);
        }
        map
    }
}
