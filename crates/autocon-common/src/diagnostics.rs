use serde::Serialize;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl DiagnosticCategory {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// Diagnostic codes, grouped by the phase that reports them.
pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const TOKEN_EXPECTED: u32 = 1005;
    pub const UNTERMINATED_COMMENT: u32 = 1010;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const MODULE_ITEM_NOT_AT_TOP_LEVEL: u32 = 1232;
    pub const UNSUPPORTED_SYNTAX: u32 = 1200;
    pub const NESTING_TOO_DEEP: u32 = 1201;
    pub const MALFORMED_NODE: u32 = 9001;
    pub const TRAVERSAL_TOO_DEEP: u32 = 9002;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) {} AC{}: {}",
            self.file,
            self.start,
            self.category.name(),
            self.code,
            self.message_text
        )
    }
}

/// Replace `{0}`, `{1}`, ... placeholders in a message template.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_replaces_placeholders() {
        assert_eq!(format_message("'{0}' expected.", &[";"]), "';' expected.");
        assert_eq!(format_message("{1} then {0}", &["a", "b"]), "b then a");
    }

    #[test]
    fn diagnostic_serializes_camel_case() {
        let diag = Diagnostic::error("a.js", 3, 1, "Expression expected.", 1109);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["messageText"], "Expression expected.");
        assert_eq!(json["category"], "error");
        assert_eq!(diag.category, DiagnosticCategory::Error);
    }
}
