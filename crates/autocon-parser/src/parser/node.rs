//! AST node storage.
//!
//! Every node is a [`Node`]: a source range, [`NodeFlags`], and a
//! [`NodeData`] payload tagged by kind. Nodes live in a [`NodeArena`] and
//! refer to their children by [`NodeIndex`]. The parser hands out each index
//! to exactly one parent, so a node owns its children; transforms that build
//! new nodes re-point a parent's field at the new index rather than sharing
//! subtrees.

use super::base::{NodeIndex, NodeList};
use autocon_scanner::SyntaxKind;
use bitflags::bitflags;
use serde::{Serialize, Serializer};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u16 {
        /// Built by a transform rather than the parser. `pos`/`end` are
        /// borrowed from the node it was derived from.
        const SYNTHESIZED = 1 << 0;
        /// Parsed with recoverable errors inside it.
        const HAS_ERROR = 1 << 1;
        /// Call written as `f?.()`.
        const OPTIONAL_CHAIN = 1 << 2;
    }
}

fn serialize_flags<S: Serializer>(flags: &NodeFlags, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(flags.bits())
}

#[derive(Clone, Debug, Serialize)]
pub struct Node {
    pub pos: u32,
    pub end: u32,
    #[serde(serialize_with = "serialize_flags")]
    pub flags: NodeFlags,
    pub data: NodeData,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn is_synthesized(&self) -> bool {
        self.flags.contains(NodeFlags::SYNTHESIZED)
    }

    pub fn is_optional_chain(&self) -> bool {
        self.flags.contains(NodeFlags::OPTIONAL_CHAIN)
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct SourceFileData {
    pub file_name: String,
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ExpressionStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn text(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclarationData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDeclaratorData {
    /// Identifier or binding pattern
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Shared by function declarations and function expressions.
#[derive(Clone, Debug, Serialize)]
pub struct FunctionData {
    /// `NONE` for anonymous function expressions
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ArrowFunctionData {
    pub parameters: NodeList,
    /// Either a `Block` or a concise-body expression
    pub body: NodeIndex,
    pub is_async: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassData {
    pub name: NodeIndex,
    pub heritage: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    Method,
    Constructor,
    Getter,
    Setter,
}

/// Shared by class methods and object-literal methods.
#[derive(Clone, Debug, Serialize)]
pub struct MethodData {
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub kind: MethodKind,
    pub parameters: NodeList,
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassPropertyData {
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub value: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct IfStatementData {
    pub test: NodeIndex,
    pub consequent: NodeIndex,
    pub alternate: NodeIndex,
}

/// `while` and `do ... while`
#[derive(Clone, Debug, Serialize)]
pub struct LoopData {
    pub test: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ForStatementData {
    pub init: NodeIndex,
    pub test: NodeIndex,
    pub update: NodeIndex,
    pub body: NodeIndex,
}

/// `for (left in right)` and `for (left of right)`
#[derive(Clone, Debug, Serialize)]
pub struct ForInOfData {
    pub left: NodeIndex,
    pub right: NodeIndex,
    pub body: NodeIndex,
}

/// Single optional operand: return, throw, spread, rest, await.
#[derive(Clone, Debug, Serialize)]
pub struct ArgumentData {
    pub argument: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct TryStatementData {
    pub block: NodeIndex,
    pub handler: NodeIndex,
    pub finalizer: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatchClauseData {
    pub param: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchStatementData {
    pub discriminant: NodeIndex,
    pub cases: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchCaseData {
    /// `NONE` for `default:`
    pub test: NodeIndex,
    pub consequent: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct IdentifierData {
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct NumericLiteralData {
    pub raw: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct StringLiteralData {
    /// Source text including quotes
    pub raw: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct BooleanLiteralData {
    pub value: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ElementsData {
    /// `NONE` entries are holes (`[a, , b]`)
    pub elements: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct PropertiesData {
    pub properties: NodeList,
}

/// `key: value` in object literals and object patterns.
///
/// Shorthand properties (`{ a }`, `{ a = 1 }` in patterns) leave `key` as
/// `NONE` and store the identifier (or an `AssignmentPattern`) in `value`.
#[derive(Clone, Debug, Serialize)]
pub struct PropertyData {
    pub key: NodeIndex,
    pub computed: bool,
    pub shorthand: bool,
    pub value: NodeIndex,
}

/// Calls and `new` expressions.
#[derive(Clone, Debug, Serialize)]
pub struct CallExpressionData {
    pub callee: NodeIndex,
    pub arguments: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct MemberExpressionData {
    pub object: NodeIndex,
    pub property: NodeIndex,
    pub computed: bool,
    /// `a?.b` / `a?.[b]`
    pub question_dot_token: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct UnaryExpressionData {
    pub operator: SyntaxKind,
    pub argument: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct UpdateExpressionData {
    pub operator: SyntaxKind,
    pub prefix: bool,
    pub argument: NodeIndex,
}

/// Binary, logical and assignment expressions.
#[derive(Clone, Debug, Serialize)]
pub struct BinaryExprData {
    pub operator: SyntaxKind,
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConditionalExpressionData {
    pub test: NodeIndex,
    pub consequent: NodeIndex,
    pub alternate: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct SequenceExpressionData {
    pub expressions: NodeList,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParenthesizedExpressionData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize)]
pub struct YieldExpressionData {
    pub argument: NodeIndex,
    pub delegate: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct AssignmentPatternData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

// =============================================================================
// Modules
// =============================================================================

/// `import clause from 'module';` or the bare `import 'module';`.
#[derive(Clone, Debug, Serialize)]
pub struct ImportDeclData {
    /// `NONE` for a side-effect-only import
    pub import_clause: NodeIndex,
    pub module_specifier: NodeIndex,
}

/// `name, * as ns` / `name, { a, b as c }`
#[derive(Clone, Debug, Serialize)]
pub struct ImportClauseData {
    /// Default binding, or `NONE`
    pub name: NodeIndex,
    /// `NamespaceImport`, `NamedImports`, or `NONE`
    pub named_bindings: NodeIndex,
}

/// Shared by `* as ns` (only `name` set) and `{ a, b }` lists (only
/// `elements` set), in both imports and exports.
#[derive(Clone, Debug, Serialize)]
pub struct NamedImportsData {
    pub name: NodeIndex,
    pub elements: NodeList,
}

/// `property_name as name`; `property_name` is `NONE` when not renamed.
#[derive(Clone, Debug, Serialize)]
pub struct SpecifierData {
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

/// `export <declaration>`, `export default <declaration>`,
/// `export { a } [from 'm']` and `export * [as ns] from 'm'`.
#[derive(Clone, Debug, Serialize)]
pub struct ExportDeclData {
    pub is_default_export: bool,
    /// A declaration, `NamedExports`, `NamespaceExport`, or `NONE` for
    /// `export * from 'm'`
    pub export_clause: NodeIndex,
    pub module_specifier: NodeIndex,
}

/// `export default <expression>;`
#[derive(Clone, Debug, Serialize)]
pub struct ExportAssignmentData {
    pub expression: NodeIndex,
}

// =============================================================================
// Tagged union
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum NodeData {
    SourceFile(SourceFileData),

    // Statements
    ExpressionStatement(ExpressionStatementData),
    VariableDeclaration(VariableDeclarationData),
    VariableDeclarator(VariableDeclaratorData),
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),
    Block(BlockData),
    IfStatement(IfStatementData),
    WhileStatement(LoopData),
    DoWhileStatement(LoopData),
    ForStatement(ForStatementData),
    ForInStatement(ForInOfData),
    ForOfStatement(ForInOfData),
    ReturnStatement(ArgumentData),
    ThrowStatement(ArgumentData),
    BreakStatement(JumpData),
    ContinueStatement(JumpData),
    TryStatement(TryStatementData),
    CatchClause(CatchClauseData),
    SwitchStatement(SwitchStatementData),
    SwitchCase(SwitchCaseData),
    LabeledStatement(LabeledData),
    EmptyStatement,
    DebuggerStatement,

    // Modules
    ImportDeclaration(ImportDeclData),
    ImportClause(ImportClauseData),
    NamespaceImport(NamedImportsData),
    NamedImports(NamedImportsData),
    ImportSpecifier(SpecifierData),
    ExportDeclaration(ExportDeclData),
    ExportAssignment(ExportAssignmentData),
    NamespaceExport(NamedImportsData),
    NamedExports(NamedImportsData),
    ExportSpecifier(SpecifierData),

    // Class members
    ClassMethod(MethodData),
    ClassProperty(ClassPropertyData),

    // Expressions
    Identifier(IdentifierData),
    NumericLiteral(NumericLiteralData),
    StringLiteral(StringLiteralData),
    BooleanLiteral(BooleanLiteralData),
    NullLiteral,
    ThisExpression,
    Super,
    /// `import` in `import(...)` and `import.meta`
    Import,
    ArrayLiteral(ElementsData),
    ObjectLiteral(PropertiesData),
    PropertyAssignment(PropertyData),
    ObjectMethod(MethodData),
    SpreadElement(ArgumentData),
    FunctionExpression(FunctionData),
    ArrowFunction(ArrowFunctionData),
    ClassExpression(ClassData),
    CallExpression(CallExpressionData),
    NewExpression(CallExpressionData),
    MemberExpression(MemberExpressionData),
    UnaryExpression(UnaryExpressionData),
    UpdateExpression(UpdateExpressionData),
    BinaryExpression(BinaryExprData),
    LogicalExpression(BinaryExprData),
    AssignmentExpression(BinaryExprData),
    ConditionalExpression(ConditionalExpressionData),
    SequenceExpression(SequenceExpressionData),
    ParenthesizedExpression(ParenthesizedExpressionData),
    AwaitExpression(ArgumentData),
    YieldExpression(YieldExpressionData),

    // Binding patterns
    ArrayPattern(ElementsData),
    ObjectPattern(PropertiesData),
    AssignmentPattern(AssignmentPatternData),
    RestElement(ArgumentData),
}

/// Fieldless mirror of [`NodeData`], used as a map key by visitor tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    SourceFile,
    ExpressionStatement,
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ClassDeclaration,
    Block,
    IfStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ReturnStatement,
    ThrowStatement,
    BreakStatement,
    ContinueStatement,
    TryStatement,
    CatchClause,
    SwitchStatement,
    SwitchCase,
    LabeledStatement,
    EmptyStatement,
    DebuggerStatement,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportDeclaration,
    ExportAssignment,
    NamespaceExport,
    NamedExports,
    ExportSpecifier,
    ClassMethod,
    ClassProperty,
    Identifier,
    NumericLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    ThisExpression,
    Super,
    Import,
    ArrayLiteral,
    ObjectLiteral,
    PropertyAssignment,
    ObjectMethod,
    SpreadElement,
    FunctionExpression,
    ArrowFunction,
    ClassExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    ParenthesizedExpression,
    AwaitExpression,
    YieldExpression,
    ArrayPattern,
    ObjectPattern,
    AssignmentPattern,
    RestElement,
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::SourceFile(_) => NodeKind::SourceFile,
            NodeData::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeData::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeData::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            NodeData::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            NodeData::ClassDeclaration(_) => NodeKind::ClassDeclaration,
            NodeData::Block(_) => NodeKind::Block,
            NodeData::IfStatement(_) => NodeKind::IfStatement,
            NodeData::WhileStatement(_) => NodeKind::WhileStatement,
            NodeData::DoWhileStatement(_) => NodeKind::DoWhileStatement,
            NodeData::ForStatement(_) => NodeKind::ForStatement,
            NodeData::ForInStatement(_) => NodeKind::ForInStatement,
            NodeData::ForOfStatement(_) => NodeKind::ForOfStatement,
            NodeData::ReturnStatement(_) => NodeKind::ReturnStatement,
            NodeData::ThrowStatement(_) => NodeKind::ThrowStatement,
            NodeData::BreakStatement(_) => NodeKind::BreakStatement,
            NodeData::ContinueStatement(_) => NodeKind::ContinueStatement,
            NodeData::TryStatement(_) => NodeKind::TryStatement,
            NodeData::CatchClause(_) => NodeKind::CatchClause,
            NodeData::SwitchStatement(_) => NodeKind::SwitchStatement,
            NodeData::SwitchCase(_) => NodeKind::SwitchCase,
            NodeData::LabeledStatement(_) => NodeKind::LabeledStatement,
            NodeData::EmptyStatement => NodeKind::EmptyStatement,
            NodeData::DebuggerStatement => NodeKind::DebuggerStatement,
            NodeData::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            NodeData::ImportClause(_) => NodeKind::ImportClause,
            NodeData::NamespaceImport(_) => NodeKind::NamespaceImport,
            NodeData::NamedImports(_) => NodeKind::NamedImports,
            NodeData::ImportSpecifier(_) => NodeKind::ImportSpecifier,
            NodeData::ExportDeclaration(_) => NodeKind::ExportDeclaration,
            NodeData::ExportAssignment(_) => NodeKind::ExportAssignment,
            NodeData::NamespaceExport(_) => NodeKind::NamespaceExport,
            NodeData::NamedExports(_) => NodeKind::NamedExports,
            NodeData::ExportSpecifier(_) => NodeKind::ExportSpecifier,
            NodeData::ClassMethod(_) => NodeKind::ClassMethod,
            NodeData::ClassProperty(_) => NodeKind::ClassProperty,
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::NumericLiteral(_) => NodeKind::NumericLiteral,
            NodeData::StringLiteral(_) => NodeKind::StringLiteral,
            NodeData::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            NodeData::NullLiteral => NodeKind::NullLiteral,
            NodeData::ThisExpression => NodeKind::ThisExpression,
            NodeData::Super => NodeKind::Super,
            NodeData::Import => NodeKind::Import,
            NodeData::ArrayLiteral(_) => NodeKind::ArrayLiteral,
            NodeData::ObjectLiteral(_) => NodeKind::ObjectLiteral,
            NodeData::PropertyAssignment(_) => NodeKind::PropertyAssignment,
            NodeData::ObjectMethod(_) => NodeKind::ObjectMethod,
            NodeData::SpreadElement(_) => NodeKind::SpreadElement,
            NodeData::FunctionExpression(_) => NodeKind::FunctionExpression,
            NodeData::ArrowFunction(_) => NodeKind::ArrowFunction,
            NodeData::ClassExpression(_) => NodeKind::ClassExpression,
            NodeData::CallExpression(_) => NodeKind::CallExpression,
            NodeData::NewExpression(_) => NodeKind::NewExpression,
            NodeData::MemberExpression(_) => NodeKind::MemberExpression,
            NodeData::UnaryExpression(_) => NodeKind::UnaryExpression,
            NodeData::UpdateExpression(_) => NodeKind::UpdateExpression,
            NodeData::BinaryExpression(_) => NodeKind::BinaryExpression,
            NodeData::LogicalExpression(_) => NodeKind::LogicalExpression,
            NodeData::AssignmentExpression(_) => NodeKind::AssignmentExpression,
            NodeData::ConditionalExpression(_) => NodeKind::ConditionalExpression,
            NodeData::SequenceExpression(_) => NodeKind::SequenceExpression,
            NodeData::ParenthesizedExpression(_) => NodeKind::ParenthesizedExpression,
            NodeData::AwaitExpression(_) => NodeKind::AwaitExpression,
            NodeData::YieldExpression(_) => NodeKind::YieldExpression,
            NodeData::ArrayPattern(_) => NodeKind::ArrayPattern,
            NodeData::ObjectPattern(_) => NodeKind::ObjectPattern,
            NodeData::AssignmentPattern(_) => NodeKind::AssignmentPattern,
            NodeData::RestElement(_) => NodeKind::RestElement,
        }
    }
}

impl NodeKind {
    /// Functions whose body starts a new function scope.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunction
                | NodeKind::ClassMethod
                | NodeKind::ObjectMethod
        )
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Arena-based storage for AST nodes.
/// Nodes are stored contiguously and referenced by index.
#[derive(Debug, Default, Serialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index
    pub fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        self.add_with_flags(pos, end, NodeFlags::empty(), data)
    }

    pub fn add_with_flags(
        &mut self,
        pos: u32,
        end: u32,
        flags: NodeFlags,
        data: NodeData,
    ) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node {
            pos,
            end,
            flags,
            data,
        });
        NodeIndex(index)
    }

    /// Get a node by index
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn kind(&self, index: NodeIndex) -> Option<NodeKind> {
        self.get(index).map(Node::kind)
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.data {
            NodeData::Identifier(ident) => Some(&ident.name),
            _ => None,
        }
    }

    /// Follow `(expr)` wrappers down to the inner expression.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(Node {
            data: NodeData::ParenthesizedExpression(paren),
            ..
        }) = self.get(index)
        {
            index = paren.expression;
        }
        index
    }

    /// Children of a node in source order, skipping absent optional children.
    pub fn get_children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let Some(node) = self.get(index) else {
            return Vec::new();
        };

        let mut children = Vec::new();
        let mut add = |idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        match &node.data {
            NodeData::SourceFile(sf) => sf.statements.iter().for_each(&mut add),
            NodeData::ExpressionStatement(stmt) => add(stmt.expression),
            NodeData::VariableDeclaration(decl) => decl.declarations.iter().for_each(&mut add),
            NodeData::VariableDeclarator(decl) => {
                add(decl.name);
                add(decl.initializer);
            }
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                add(func.name);
                func.parameters.iter().for_each(&mut add);
                add(func.body);
            }
            NodeData::ArrowFunction(arrow) => {
                arrow.parameters.iter().for_each(&mut add);
                add(arrow.body);
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                add(class.name);
                add(class.heritage);
                class.members.iter().for_each(&mut add);
            }
            NodeData::ClassMethod(method) | NodeData::ObjectMethod(method) => {
                add(method.key);
                method.parameters.iter().for_each(&mut add);
                add(method.body);
            }
            NodeData::ClassProperty(prop) => {
                add(prop.key);
                add(prop.value);
            }
            NodeData::Block(block) => block.statements.iter().for_each(&mut add),
            NodeData::IfStatement(stmt) => {
                add(stmt.test);
                add(stmt.consequent);
                add(stmt.alternate);
            }
            NodeData::WhileStatement(stmt) => {
                add(stmt.test);
                add(stmt.body);
            }
            NodeData::DoWhileStatement(stmt) => {
                add(stmt.body);
                add(stmt.test);
            }
            NodeData::ForStatement(stmt) => {
                add(stmt.init);
                add(stmt.test);
                add(stmt.update);
                add(stmt.body);
            }
            NodeData::ForInStatement(stmt) | NodeData::ForOfStatement(stmt) => {
                add(stmt.left);
                add(stmt.right);
                add(stmt.body);
            }
            NodeData::ReturnStatement(arg)
            | NodeData::ThrowStatement(arg)
            | NodeData::SpreadElement(arg)
            | NodeData::AwaitExpression(arg)
            | NodeData::RestElement(arg) => add(arg.argument),
            NodeData::BreakStatement(jump) | NodeData::ContinueStatement(jump) => add(jump.label),
            NodeData::TryStatement(stmt) => {
                add(stmt.block);
                add(stmt.handler);
                add(stmt.finalizer);
            }
            NodeData::CatchClause(clause) => {
                add(clause.param);
                add(clause.body);
            }
            NodeData::SwitchStatement(stmt) => {
                add(stmt.discriminant);
                stmt.cases.iter().for_each(&mut add);
            }
            NodeData::SwitchCase(case) => {
                add(case.test);
                case.consequent.iter().for_each(&mut add);
            }
            NodeData::LabeledStatement(labeled) => {
                add(labeled.label);
                add(labeled.statement);
            }
            NodeData::ImportDeclaration(decl) => {
                add(decl.import_clause);
                add(decl.module_specifier);
            }
            NodeData::ImportClause(clause) => {
                add(clause.name);
                add(clause.named_bindings);
            }
            NodeData::NamespaceImport(named)
            | NodeData::NamedImports(named)
            | NodeData::NamespaceExport(named)
            | NodeData::NamedExports(named) => {
                add(named.name);
                named.elements.iter().for_each(&mut add);
            }
            NodeData::ImportSpecifier(spec) | NodeData::ExportSpecifier(spec) => {
                add(spec.property_name);
                add(spec.name);
            }
            NodeData::ExportDeclaration(decl) => {
                add(decl.export_clause);
                add(decl.module_specifier);
            }
            NodeData::ExportAssignment(assign) => add(assign.expression),
            NodeData::ArrayLiteral(list) | NodeData::ArrayPattern(list) => {
                list.elements.iter().for_each(&mut add)
            }
            NodeData::ObjectLiteral(obj) | NodeData::ObjectPattern(obj) => {
                obj.properties.iter().for_each(&mut add)
            }
            NodeData::PropertyAssignment(prop) => {
                add(prop.key);
                add(prop.value);
            }
            NodeData::CallExpression(call) | NodeData::NewExpression(call) => {
                add(call.callee);
                call.arguments.iter().for_each(&mut add);
            }
            NodeData::MemberExpression(member) => {
                add(member.object);
                add(member.property);
            }
            NodeData::UnaryExpression(unary) => add(unary.argument),
            NodeData::UpdateExpression(update) => add(update.argument),
            NodeData::BinaryExpression(bin)
            | NodeData::LogicalExpression(bin)
            | NodeData::AssignmentExpression(bin) => {
                add(bin.left);
                add(bin.right);
            }
            NodeData::ConditionalExpression(cond) => {
                add(cond.test);
                add(cond.consequent);
                add(cond.alternate);
            }
            NodeData::SequenceExpression(seq) => seq.expressions.iter().for_each(&mut add),
            NodeData::ParenthesizedExpression(paren) => add(paren.expression),
            NodeData::YieldExpression(expr) => add(expr.argument),
            NodeData::AssignmentPattern(pattern) => {
                add(pattern.left);
                add(pattern.right);
            }
            NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::Identifier(_)
            | NodeData::NumericLiteral(_)
            | NodeData::StringLiteral(_)
            | NodeData::BooleanLiteral(_)
            | NodeData::NullLiteral
            | NodeData::ThisExpression
            | NodeData::Super
            | NodeData::Import => {}
        }

        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(arena: &mut NodeArena, name: &str) -> NodeIndex {
        arena.add(
            0,
            name.len() as u32,
            NodeData::Identifier(IdentifierData {
                name: name.to_string(),
            }),
        )
    }

    #[test]
    fn skip_parentheses_unwraps_nested_parens() {
        let mut arena = NodeArena::new();
        let inner = ident(&mut arena, "a");
        let paren = arena.add(
            0,
            3,
            NodeData::ParenthesizedExpression(ParenthesizedExpressionData { expression: inner }),
        );
        let outer = arena.add(
            0,
            5,
            NodeData::ParenthesizedExpression(ParenthesizedExpressionData { expression: paren }),
        );
        assert_eq!(arena.skip_parentheses(outer), inner);
        assert_eq!(arena.skip_parentheses(inner), inner);
    }

    #[test]
    fn children_skip_absent_fields() {
        let mut arena = NodeArena::new();
        let test = ident(&mut arena, "a");
        let body = arena.add(0, 2, NodeData::Block(BlockData { statements: NodeList::new() }));
        let stmt = arena.add(
            0,
            10,
            NodeData::IfStatement(IfStatementData {
                test,
                consequent: body,
                alternate: NodeIndex::NONE,
            }),
        );
        assert_eq!(arena.get_children(stmt), vec![test, body]);
        assert_eq!(arena.kind(stmt), Some(NodeKind::IfStatement));
        assert!(arena.get(NodeIndex::NONE).is_none());
        assert!(arena.get_children(NodeIndex(99)).is_empty());
    }

    #[test]
    fn serializes_with_type_tag() {
        let mut arena = NodeArena::new();
        ident(&mut arena, "x");
        let json = serde_json::to_value(&arena).unwrap();
        assert_eq!(json["nodes"][0]["data"]["type"], "Identifier");
        assert_eq!(json["nodes"][0]["data"]["name"], "x");
    }
}
