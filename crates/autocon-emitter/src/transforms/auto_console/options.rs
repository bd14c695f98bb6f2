//! Configuration of the auto-console pass.

use autocon_parser::parser::node::{NodeData, StringLiteralData};
use autocon_parser::{NodeArena, NodeIndex, NodeKind};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Output callee
// =============================================================================

/// The `object.property` function that wrapped statements are passed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputCallee {
    pub object: String,
    pub property: String,
}

impl Default for OutputCallee {
    fn default() -> Self {
        OutputCallee {
            object: "console".to_string(),
            property: "log".to_string(),
        }
    }
}

impl OutputCallee {
    pub fn new(object: impl Into<String>, property: impl Into<String>) -> Self {
        OutputCallee {
            object: object.into(),
            property: property.into(),
        }
    }

    /// `callee` is `object.property` or `object["property"]`.
    pub fn matches(&self, arena: &NodeArena, callee: NodeIndex) -> bool {
        let Some(NodeData::MemberExpression(member)) = arena.get(callee).map(|n| &n.data) else {
            return false;
        };
        if arena.get_identifier_text(member.object) != Some(self.object.as_str()) {
            return false;
        }
        if member.computed {
            match arena.get(member.property).map(|n| &n.data) {
                Some(NodeData::StringLiteral(StringLiteralData { value, .. })) => {
                    *value == self.property
                }
                _ => false,
            }
        } else {
            arena.get_identifier_text(member.property) == Some(self.property.as_str())
        }
    }

    /// `callee` is any member of the output object (`console.error`,
    /// `console[level]`).
    pub fn matches_namespace(&self, arena: &NodeArena, callee: NodeIndex) -> bool {
        match arena.get(callee).map(|n| &n.data) {
            Some(NodeData::MemberExpression(member)) => {
                arena.get_identifier_text(member.object) == Some(self.object.as_str())
            }
            _ => false,
        }
    }
}

impl fmt::Display for OutputCallee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.property)
    }
}

/// A callee string that is not exactly `object.property`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputCalleeError {
    pub input: String,
}

impl fmt::Display for OutputCalleeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid output callee '{}': expected two dotted identifiers such as 'console.log'",
            self.input
        )
    }
}

impl std::error::Error for OutputCalleeError {}

fn is_identifier_name(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(autocon_scanner::char_codes::is_identifier_start)
        && chars.all(autocon_scanner::char_codes::is_identifier_part)
}

impl FromStr for OutputCallee {
    type Err = OutputCalleeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || OutputCalleeError {
            input: s.to_string(),
        };
        let (object, property) = s.trim().split_once('.').ok_or_else(err)?;
        if !is_identifier_name(object) || !is_identifier_name(property) {
            return Err(err());
        }
        Ok(OutputCallee::new(object, property))
    }
}

// =============================================================================
// Function body policy
// =============================================================================

/// Which function bodies the pass leaves alone. `true` excludes the body:
/// nothing inside it is rewritten, at any depth. Class and object-literal
/// method bodies are always rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FunctionBodyPolicy {
    pub function_declarations: bool,
    pub function_expressions: bool,
    pub arrow_functions: bool,
    /// Also exclude `async` bodies whose kind is otherwise rewritten.
    pub async_functions: bool,
    /// Also exclude generator bodies whose kind is otherwise rewritten.
    pub generators: bool,
}

impl Default for FunctionBodyPolicy {
    fn default() -> Self {
        FunctionBodyPolicy {
            function_declarations: true,
            function_expressions: true,
            arrow_functions: true,
            async_functions: false,
            generators: false,
        }
    }
}

impl FunctionBodyPolicy {
    /// Rewrite every function body.
    pub fn rewrite_all() -> Self {
        FunctionBodyPolicy {
            function_declarations: false,
            function_expressions: false,
            arrow_functions: false,
            async_functions: false,
            generators: false,
        }
    }

    pub fn excludes(&self, kind: NodeKind, is_async: bool, is_generator: bool) -> bool {
        let by_kind = match kind {
            NodeKind::FunctionDeclaration => self.function_declarations,
            NodeKind::FunctionExpression => self.function_expressions,
            NodeKind::ArrowFunction => self.arrow_functions,
            _ => return false,
        };
        by_kind || (is_async && self.async_functions) || (is_generator && self.generators)
    }
}

// =============================================================================
// Pass options
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoConsoleOptions {
    pub callee: OutputCallee,
    /// Leave every call on the output object alone, not only the callee
    /// itself (`console.error(e)` stays as is).
    ///
    /// Off by default, so `console.error(e);` becomes
    /// `console.log(console.error(e));` like any other call. Turn it on to
    /// keep other console methods untouched, as in
    /// `try { alert(x) } catch (e) { console.error(e) }`.
    pub preserve_namespace_calls: bool,
    pub function_bodies: FunctionBodyPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_callee() {
        let callee: OutputCallee = "logger.info".parse().unwrap();
        assert_eq!(callee, OutputCallee::new("logger", "info"));
        assert_eq!(callee.to_string(), "logger.info");
        assert_eq!(
            " console.log ".parse::<OutputCallee>().unwrap(),
            OutputCallee::default()
        );
    }

    #[test]
    fn rejects_malformed_callee() {
        for input in ["console", "console.", ".log", "a.b.c", "1x.log", ""] {
            assert!(
                input.parse::<OutputCallee>().is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn default_policy_excludes_plain_functions_only() {
        let policy = FunctionBodyPolicy::default();
        assert!(policy.excludes(NodeKind::FunctionDeclaration, false, false));
        assert!(policy.excludes(NodeKind::FunctionExpression, false, false));
        assert!(policy.excludes(NodeKind::ArrowFunction, true, false));
        assert!(!policy.excludes(NodeKind::ClassMethod, true, true));
        assert!(!policy.excludes(NodeKind::ObjectMethod, false, false));
    }

    #[test]
    fn async_and_generator_switches_add_exclusions() {
        let policy = FunctionBodyPolicy {
            async_functions: true,
            generators: true,
            ..FunctionBodyPolicy::rewrite_all()
        };
        assert!(!policy.excludes(NodeKind::ArrowFunction, false, false));
        assert!(policy.excludes(NodeKind::ArrowFunction, true, false));
        assert!(policy.excludes(NodeKind::FunctionExpression, false, true));
        assert!(!policy.excludes(NodeKind::ClassMethod, true, true));
    }

    #[test]
    fn policy_deserializes_partially() {
        let policy: FunctionBodyPolicy =
            serde_json::from_str(r#"{ "arrowFunctions": false }"#).unwrap();
        assert!(!policy.arrow_functions);
        assert!(policy.function_declarations);
    }
}
