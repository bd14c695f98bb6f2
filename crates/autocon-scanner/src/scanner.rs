//! Scanner state machine.
//!
//! The scanner is pull-based: the parser calls [`ScannerState::scan`] to move
//! to the next token and reads the current token through accessors. Lookahead
//! uses [`ScannerState::save_state`] / [`ScannerState::restore_state`].

use crate::SyntaxKind;
use crate::char_codes::{
    is_digit_in_radix, is_identifier_part, is_identifier_start, is_line_break,
    is_white_space_single_line,
};
use autocon_common::diagnostics::diagnostic_codes;
use bitflags::bitflags;

bitflags! {
    /// Flags describing the current token.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u8 {
        /// A line terminator appeared between the previous token and this one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// A string literal or comment ran into end of input.
        const UNTERMINATED = 1 << 1;
    }
}

/// An error found while scanning, kept until the parser collects it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub pos: u32,
    pub length: u32,
    pub code: u32,
    pub message: &'static str,
}

/// Everything needed to rewind the scanner to an earlier token.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    token_flags: TokenFlags,
    error_count: usize,
}

pub struct ScannerState {
    text: String,
    /// Current position (end of the current token)
    pos: usize,
    token: SyntaxKind,
    /// Start of the current token, after leading trivia
    token_start: usize,
    /// Identifier name, cooked string value, or numeric text
    token_value: String,
    token_flags: TokenFlags,
    errors: Vec<ScanError>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        ScannerState {
            text,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
            errors: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            error_count: self.errors.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.errors.truncate(snapshot.error_count);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn error(&mut self, pos: usize, length: usize, code: u32, message: &'static str) {
        self.errors.push(ScanError {
            pos: pos as u32,
            length: length as u32,
            code,
            message,
        });
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.bump() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            '(' => SyntaxKind::OpenParenToken,
            ')' => SyntaxKind::CloseParenToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            ';' => SyntaxKind::SemicolonToken,
            ',' => SyntaxKind::CommaToken,
            ':' => SyntaxKind::ColonToken,
            '~' => SyntaxKind::TildeToken,
            '.' => {
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(ch)
                } else if self.peek_char() == Some('.') && self.peek_char_at(1) == Some('.') {
                    self.pos += 2;
                    SyntaxKind::DotDotDotToken
                } else {
                    SyntaxKind::DotToken
                }
            }
            '?' => {
                // `a?.5:b` is a conditional, not an optional chain.
                if self.peek_char() == Some('.')
                    && !self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit())
                {
                    self.pos += 1;
                    SyntaxKind::QuestionDotToken
                } else if self.eat('?') {
                    if self.eat('=') {
                        SyntaxKind::QuestionQuestionEqualsToken
                    } else {
                        SyntaxKind::QuestionQuestionToken
                    }
                } else {
                    SyntaxKind::QuestionToken
                }
            }
            '=' => {
                if self.eat('>') {
                    SyntaxKind::EqualsGreaterThanToken
                } else if self.eat('=') {
                    if self.eat('=') {
                        SyntaxKind::EqualsEqualsEqualsToken
                    } else {
                        SyntaxKind::EqualsEqualsToken
                    }
                } else {
                    SyntaxKind::EqualsToken
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        SyntaxKind::ExclamationEqualsEqualsToken
                    } else {
                        SyntaxKind::ExclamationEqualsToken
                    }
                } else {
                    SyntaxKind::ExclamationToken
                }
            }
            '+' => {
                if self.eat('+') {
                    SyntaxKind::PlusPlusToken
                } else if self.eat('=') {
                    SyntaxKind::PlusEqualsToken
                } else {
                    SyntaxKind::PlusToken
                }
            }
            '-' => {
                if self.eat('-') {
                    SyntaxKind::MinusMinusToken
                } else if self.eat('=') {
                    SyntaxKind::MinusEqualsToken
                } else {
                    SyntaxKind::MinusToken
                }
            }
            '*' => {
                if self.eat('*') {
                    if self.eat('=') {
                        SyntaxKind::AsteriskAsteriskEqualsToken
                    } else {
                        SyntaxKind::AsteriskAsteriskToken
                    }
                } else if self.eat('=') {
                    SyntaxKind::AsteriskEqualsToken
                } else {
                    SyntaxKind::AsteriskToken
                }
            }
            '/' => {
                if self.eat('=') {
                    SyntaxKind::SlashEqualsToken
                } else {
                    SyntaxKind::SlashToken
                }
            }
            '%' => {
                if self.eat('=') {
                    SyntaxKind::PercentEqualsToken
                } else {
                    SyntaxKind::PercentToken
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        SyntaxKind::LessThanLessThanEqualsToken
                    } else {
                        SyntaxKind::LessThanLessThanToken
                    }
                } else if self.eat('=') {
                    SyntaxKind::LessThanEqualsToken
                } else {
                    SyntaxKind::LessThanToken
                }
            }
            '>' => self.scan_greater_than(),
            '&' => {
                if self.eat('&') {
                    if self.eat('=') {
                        SyntaxKind::AmpersandAmpersandEqualsToken
                    } else {
                        SyntaxKind::AmpersandAmpersandToken
                    }
                } else if self.eat('=') {
                    SyntaxKind::AmpersandEqualsToken
                } else {
                    SyntaxKind::AmpersandToken
                }
            }
            '|' => {
                if self.eat('|') {
                    if self.eat('=') {
                        SyntaxKind::BarBarEqualsToken
                    } else {
                        SyntaxKind::BarBarToken
                    }
                } else if self.eat('=') {
                    SyntaxKind::BarEqualsToken
                } else {
                    SyntaxKind::BarToken
                }
            }
            '^' => {
                if self.eat('=') {
                    SyntaxKind::CaretEqualsToken
                } else {
                    SyntaxKind::CaretToken
                }
            }
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.error(
                    self.token_start,
                    1,
                    diagnostic_codes::UNSUPPORTED_SYNTAX,
                    "Template literals are not supported.",
                );
                SyntaxKind::Unknown
            }
            c if c.is_ascii_digit() => self.scan_number(c),
            c if is_identifier_start(c) => self.scan_identifier(c),
            _ => {
                self.error(
                    self.token_start,
                    ch.len_utf8(),
                    diagnostic_codes::INVALID_CHARACTER,
                    "Invalid character.",
                );
                SyntaxKind::Unknown
            }
        };
        self.token
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        if self.eat('>') {
            if self.eat('>') {
                if self.eat('=') {
                    SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
                } else {
                    SyntaxKind::GreaterThanGreaterThanGreaterThanToken
                }
            } else if self.eat('=') {
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            } else {
                SyntaxKind::GreaterThanGreaterThanToken
            }
        } else if self.eat('=') {
            SyntaxKind::GreaterThanEqualsToken
        } else {
            SyntaxKind::GreaterThanToken
        }
    }

    /// Skip whitespace and comments, recording line breaks.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.peek_char_at(1) == Some('/') {
                while let Some(c) = self.peek_char() {
                    if is_line_break(c) {
                        break;
                    }
                    self.pos += c.len_utf8();
                }
            } else if ch == '/' && self.peek_char_at(1) == Some('*') {
                let start = self.pos;
                self.pos += 2;
                let mut closed = false;
                while let Some(c) = self.bump() {
                    if c == '*' && self.eat('/') {
                        closed = true;
                        break;
                    }
                    if is_line_break(c) {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                }
                if !closed {
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(
                        start,
                        self.pos - start,
                        diagnostic_codes::UNTERMINATED_COMMENT,
                        "'*/' expected.",
                    );
                }
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, first: char) -> SyntaxKind {
        self.token_value.push(first);
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.token_value.push(ch);
            self.pos += ch.len_utf8();
        }
        SyntaxKind::keyword_from_text(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self, first: char) -> SyntaxKind {
        if first == '0' {
            let radix = match self.peek_char() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.pos += 1;
                self.scan_digits(radix);
                self.finish_number();
                return SyntaxKind::NumericLiteral;
            }
        }

        if first != '.' {
            self.scan_digits(10);
            if self.peek_char() == Some('.') {
                self.pos += 1;
                self.scan_digits(10);
            }
        } else {
            self.scan_digits(10);
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.scan_digits(10);
            } else {
                self.pos = save;
            }
        }
        self.finish_number();
        SyntaxKind::NumericLiteral
    }

    fn scan_digits(&mut self, radix: u32) {
        while let Some(ch) = self.peek_char() {
            if is_digit_in_radix(ch, radix) || ch == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Consume a BigInt suffix and record the numeric text.
    fn finish_number(&mut self) {
        self.eat('n');
        self.token_value = self.text[self.token_start..self.pos].to_string();
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        loop {
            let Some(ch) = self.peek_char() else {
                self.unterminated_string();
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.unterminated_string();
                break;
            }
            self.pos += ch.len_utf8();
            if ch == '\\' {
                self.scan_escape();
            } else {
                self.token_value.push(ch);
            }
        }
        SyntaxKind::StringLiteral
    }

    fn unterminated_string(&mut self) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.error(
            self.token_start,
            self.pos - self.token_start,
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
            "Unterminated string literal.",
        );
    }

    fn scan_escape(&mut self) {
        let Some(ch) = self.bump() else {
            return;
        };
        let cooked = match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'v' => '\u{000B}',
            '0' if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) => '\0',
            'x' => match self.scan_hex_digits(2) {
                Some(c) => c,
                None => return,
            },
            'u' => match self.scan_unicode_escape() {
                Some(c) => c,
                None => return,
            },
            // Line continuation
            '\r' => {
                self.eat('\n');
                return;
            }
            c if is_line_break(c) => return,
            c => c,
        };
        self.token_value.push(cooked);
    }

    fn scan_hex_digits(&mut self, count: usize) -> Option<char> {
        let start = self.pos;
        for _ in 0..count {
            match self.peek_char() {
                Some(c) if c.is_ascii_hexdigit() => self.pos += 1,
                _ => return None,
            }
        }
        u32::from_str_radix(&self.text[start..self.pos], 16)
            .ok()
            .and_then(char::from_u32)
    }

    fn scan_unicode_escape(&mut self) -> Option<char> {
        if self.eat('{') {
            let start = self.pos;
            while self.peek_char().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let value = u32::from_str_radix(&self.text[start..self.pos], 16).ok();
            self.eat('}');
            value.and_then(char::from_u32)
        } else {
            self.scan_hex_digits(4)
        }
    }
}
